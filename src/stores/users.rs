use crate::errors::{ClientError, NotFoundError};
use crate::models::{Resource, User};
use crate::services::ResourceGateway;

use super::entity::EntityStore;

/// Admin-side account management over the users collection. Listing and
/// deletion come straight from the entity store; the password change is
/// an independent update that leaves every other field as stored.
pub struct UserStore<G: ResourceGateway<User>> {
    pub entity: EntityStore<User, G>,
}

impl<G: ResourceGateway<User>> UserStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            entity: EntityStore::new(gateway),
        }
    }

    /// Replaces only the password of a fetched account. The update is a
    /// full replace on the wire, so the current field values ride along.
    pub async fn update_password(
        &mut self,
        id: u64,
        new_password: String,
    ) -> Result<User, ClientError> {
        let existing = self
            .entity
            .items()
            .iter()
            .find(|u| u.id == id)
            .ok_or(NotFoundError {
                resource: <User as Resource>::NAME,
                id,
            })?;
        let mut draft = existing.to_draft();
        draft.password = new_password;
        Ok(self.entity.update(id, &draft).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::stores::testing::{sample_user, InMemoryGateway};

    fn seeded_store() -> UserStore<InMemoryGateway<User>> {
        UserStore::new(InMemoryGateway::with_items(vec![
            sample_user(1, "alice", "p1", "a@x.com", Role::Admin),
            sample_user(2, "bob", "p2", "b@x.com", Role::User),
        ]))
    }

    #[tokio::test]
    async fn password_change_keeps_the_rest_of_the_account() {
        let mut store = seeded_store();
        store.entity.fetch_all().await.unwrap();
        let updated = store.update_password(2, "fresh".into()).await.unwrap();
        assert_eq!(updated.password, "fresh");
        assert_eq!(updated.username, "bob");
        assert_eq!(updated.role, Role::User);
    }

    #[tokio::test]
    async fn password_change_requires_a_fetched_account() {
        let mut store = seeded_store();
        let err = store.update_password(2, "fresh".into()).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn admin_delete_removes_the_account() {
        let mut store = seeded_store();
        store.entity.fetch_all().await.unwrap();
        store.entity.remove(1).await.unwrap();
        assert_eq!(store.entity.items().len(), 1);
        assert_eq!(store.entity.items()[0].username, "bob");
    }
}
