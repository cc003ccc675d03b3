use chrono::Utc;

use crate::errors::{ClientError, ValidationError};
use crate::models::{Comment, CommentDraft};
use crate::services::{ListQuery, ResourceGateway, TokenSource};

use super::entity::EntityStore;

/// Comments for the currently viewed project, newest first. Posting
/// requires a session token; the pre-flight check mirrors the backend's
/// policy so the form can fail before any request is sent.
pub struct CommentStore<G: ResourceGateway<Comment>> {
    pub entity: EntityStore<Comment, G>,
    token_source: TokenSource,
}

impl<G: ResourceGateway<Comment>> CommentStore<G> {
    pub fn new(gateway: G, token_source: TokenSource) -> Self {
        Self {
            entity: EntityStore::new(gateway),
            token_source,
        }
    }

    /// Loads the comments of one project, ordered by creation time
    /// descending for display.
    pub async fn fetch_for_project(&mut self, project_id: u64) -> Result<(), ClientError> {
        let query = ListQuery::new()
            .eq("projectId", project_id)
            .ordering("-createdAt");
        self.entity.fetch_where(&query).await?;
        Ok(())
    }

    /// Posts a comment. `author` is the display name; `user_id` links the
    /// account when the visitor is signed in.
    pub async fn add(
        &mut self,
        project_id: u64,
        author: String,
        content: String,
        user_id: Option<u64>,
    ) -> Result<Comment, ClientError> {
        if (self.token_source)().is_none() {
            let err = ValidationError::AuthenticationRequired;
            self.entity.fail_local(err.to_string());
            return Err(err.into());
        }
        let draft = CommentDraft {
            project_id,
            author,
            content,
            user_id,
            created_at: Utc::now(),
        };
        let created = self.entity.create(&draft).await?;
        Ok(created)
    }

    /// Deletes a comment (owner or admin; the server enforces the
    /// permission).
    pub async fn delete(&mut self, id: u64) -> Result<u64, ClientError> {
        Ok(self.entity.remove(id).await?)
    }
}
