use chrono::Utc;

use crate::errors::{ClientError, NotFoundError};
use crate::models::{ContactDraft, ContactMessage, ContactStatus, Resource};
use crate::services::ResourceGateway;

use super::entity::EntityStore;

/// Contact submissions. The public site only writes through [`submit`];
/// listing and status triage belong to the admin back office.
///
/// [`submit`]: ContactStore::submit
pub struct ContactStore<G: ResourceGateway<ContactMessage>> {
    pub entity: EntityStore<ContactMessage, G>,
}

impl<G: ResourceGateway<ContactMessage>> ContactStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            entity: EntityStore::new(gateway),
        }
    }

    /// Sends a contact-form message. New submissions always start in
    /// [`ContactStatus::New`]; `user_id` tags the sender's account when
    /// one is signed in.
    pub async fn submit(
        &mut self,
        name: String,
        email: String,
        message: String,
        user_id: Option<u64>,
    ) -> Result<ContactMessage, ClientError> {
        let draft = ContactDraft {
            name,
            email,
            message,
            user_id,
            status: ContactStatus::New,
            created_at: Utc::now(),
        };
        Ok(self.entity.create(&draft).await?)
    }

    /// Advances the triage status of a submission already present in the
    /// fetched collection. The backend update is a full replace, so the
    /// stored fields ride along unchanged.
    pub async fn set_status(
        &mut self,
        id: u64,
        status: ContactStatus,
    ) -> Result<ContactMessage, ClientError> {
        let existing = self
            .entity
            .items()
            .iter()
            .find(|m| m.id == id)
            .ok_or(NotFoundError {
                resource: <ContactMessage as Resource>::NAME,
                id,
            })?;
        let mut draft = existing.to_draft();
        draft.status = status;
        Ok(self.entity.update(id, &draft).await?)
    }
}
