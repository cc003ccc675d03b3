use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::api_client::ApiClient;
use super::resources::{ListQuery, ResourceApi, ResourceGateway};
use crate::errors::RemoteError;
use crate::models::{User, UserDraft};

/// Account lookups used by the session store. There is no dedicated login
/// endpoint on the backend: lookups are list queries filtered by the
/// unique column, and the credential comparison happens client-side.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RemoteError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RemoteError>;
    async fn create_account(&self, draft: &UserDraft) -> Result<User, RemoteError>;
}

/// REST-backed account gateway over the `/users` collection.
pub struct AccountApi {
    users: ResourceApi<User>,
}

impl AccountApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            users: ResourceApi::new(client),
        }
    }
}

#[async_trait]
impl AccountGateway for AccountApi {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RemoteError> {
        debug!("account lookup by username");
        let matches = self
            .users
            .list(&ListQuery::new().eq("username", username))
            .await?;
        Ok(matches.into_iter().next())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RemoteError> {
        debug!("account lookup by email");
        let matches = self.users.list(&ListQuery::new().eq("email", email)).await?;
        Ok(matches.into_iter().next())
    }

    async fn create_account(&self, draft: &UserDraft) -> Result<User, RemoteError> {
        self.users.create(draft).await
    }
}
