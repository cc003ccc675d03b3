use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use super::api_client::ApiClient;
use crate::errors::RemoteError;
use crate::models::Resource;

/// Equality filters plus an optional sort key for a collection listing,
/// e.g. `ListQuery::new().eq("projectId", 7).ordering("-createdAt")`.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    params: Vec<(String, String)>,
    ordering: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl ToString) -> Self {
        self.params.push((field.to_string(), value.to_string()));
        self
    }

    /// Sort key; prefix with `-` for descending order.
    pub fn ordering(mut self, key: &str) -> Self {
        self.ordering = Some(key.to_string());
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn ordering_key(&self) -> Option<&str> {
        self.ordering.as_deref()
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&str, String)> {
        let mut pairs: Vec<(&str, String)> = self
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        if let Some(ordering) = &self.ordering {
            pairs.push(("ordering", ordering.clone()));
        }
        pairs
    }
}

/// Resource-oriented call surface consumed by the entity stores. Stores
/// are generic over this trait so tests run against an in-memory
/// implementation instead of the network.
#[async_trait]
pub trait ResourceGateway<T: Resource>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Vec<T>, RemoteError>;
    async fn get_by_id(&self, id: u64) -> Result<T, RemoteError>;
    async fn create(&self, draft: &T::Draft) -> Result<T, RemoteError>;
    /// Full replace of the entity at `id`.
    async fn update(&self, id: u64, draft: &T::Draft) -> Result<T, RemoteError>;
    async fn remove(&self, id: u64) -> Result<u64, RemoteError>;
}

/// REST-backed gateway for one resource collection.
pub struct ResourceApi<T: Resource> {
    client: Arc<ApiClient>,
    _resource: PhantomData<fn() -> T>,
}

impl<T: Resource> ResourceApi<T> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: u64) -> String {
        format!("{}/{}", T::PATH, id)
    }
}

#[async_trait]
impl<T: Resource> ResourceGateway<T> for ResourceApi<T> {
    async fn list(&self, query: &ListQuery) -> Result<Vec<T>, RemoteError> {
        self.client.get_json(T::PATH, &query.to_pairs()).await
    }

    async fn get_by_id(&self, id: u64) -> Result<T, RemoteError> {
        self.client.get_json(&Self::item_path(id), &[]).await
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, RemoteError> {
        self.client.post_json(T::PATH, draft).await
    }

    async fn update(&self, id: u64, draft: &T::Draft) -> Result<T, RemoteError> {
        self.client.put_json(&Self::item_path(id), draft).await
    }

    async fn remove(&self, id: u64) -> Result<u64, RemoteError> {
        self.client.delete(&Self::item_path(id)).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    #[test]
    fn query_pairs_append_ordering_last() {
        let query = ListQuery::new().eq("projectId", 7).ordering("-createdAt");
        let pairs = query.to_pairs();
        assert_eq!(pairs[0], ("projectId", "7".to_string()));
        assert_eq!(pairs[1], ("ordering", "-createdAt".to_string()));
    }

    #[test]
    fn item_paths_embed_the_collection() {
        assert_eq!(ResourceApi::<Project>::item_path(12), "projects/12");
    }
}
