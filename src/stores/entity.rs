use log::debug;

use crate::errors::RemoteError;
use crate::models::Resource;
use crate::services::{ListQuery, ResourceGateway};

/// Request lifecycle of a store. Re-enters `Loading` on every new fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// State container for one resource collection: the fetched items in
/// server order, a transient "current item" slot and the request
/// lifecycle. Failed operations leave the previous collection intact.
///
/// Two in-flight fetches are not fenced against each other; whichever
/// response is applied last wins, matching the backend-of-record policy
/// for this single-user admin tool.
pub struct EntityStore<T: Resource, G: ResourceGateway<T>> {
    gateway: G,
    items: Vec<T>,
    current: Option<T>,
    status: Status,
    error: Option<String>,
}

impl<T: Resource, G: ResourceGateway<T>> EntityStore<T, G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            items: Vec::new(),
            current: None,
            status: Status::Idle,
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Drops the current-item slot, e.g. when navigating away from a
    /// detail view. The collection is untouched.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Replaces the whole collection with the server's response, in
    /// response order.
    pub async fn fetch_all(&mut self) -> Result<(), RemoteError> {
        self.fetch_where(&ListQuery::new()).await
    }

    pub async fn fetch_where(&mut self, query: &ListQuery) -> Result<(), RemoteError> {
        self.status = Status::Loading;
        match self.gateway.list(query).await {
            Ok(items) => {
                debug!("{}: fetched {} items", T::NAME, items.len());
                self.items = items;
                self.succeed();
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Loads one entity into the current-item slot. The collection is
    /// never touched by this path.
    pub async fn fetch_by_id(&mut self, id: u64) -> Result<(), RemoteError> {
        self.status = Status::Loading;
        match self.gateway.get_by_id(id).await {
            Ok(item) => {
                self.current = Some(item);
                self.succeed();
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Creates the entity and appends it to the collection. The
    /// current-item slot is not touched.
    pub async fn create(&mut self, draft: &T::Draft) -> Result<T, RemoteError> {
        self.status = Status::Loading;
        match self.gateway.create(draft).await {
            Ok(created) => {
                self.items.push(created.clone());
                self.succeed();
                Ok(created)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Full replace of the entity at `id`.
    ///
    /// The collection entry is replaced in place when present; when the
    /// id is missing from the collection the result is dropped from the
    /// list while the current-item slot still updates. That asymmetry is
    /// inherited behavior, kept rather than reconciled into an upsert.
    pub async fn update(&mut self, id: u64, draft: &T::Draft) -> Result<T, RemoteError> {
        self.status = Status::Loading;
        match self.gateway.update(id, draft).await {
            Ok(updated) => {
                if let Some(pos) = self.items.iter().position(|item| item.id() == id) {
                    self.items[pos] = updated.clone();
                }
                if self.current.as_ref().map(T::id) == Some(id) {
                    self.current = Some(updated.clone());
                }
                self.succeed();
                Ok(updated)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Deletes the entity, removes it from the collection and clears the
    /// current-item slot when it pointed at the same id.
    pub async fn remove(&mut self, id: u64) -> Result<u64, RemoteError> {
        self.status = Status::Loading;
        match self.gateway.remove(id).await {
            Ok(removed) => {
                self.items.retain(|item| item.id() != removed);
                if self.current.as_ref().map(T::id) == Some(removed) {
                    self.current = None;
                }
                self.succeed();
                Ok(removed)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn succeed(&mut self) {
        self.status = Status::Succeeded;
        self.error = None;
    }

    fn fail(&mut self, err: RemoteError) -> RemoteError {
        self.status = Status::Failed;
        self.error = Some(err.message.clone());
        err
    }

    /// Records a pre-flight failure that never reached the gateway, so
    /// the interface layer sees it through the same status/error fields.
    pub(crate) fn fail_local(&mut self, message: String) {
        self.status = Status::Failed;
        self.error = Some(message);
    }

    /// Back to the initial state: no items, no current item, `Idle`.
    pub fn reset(&mut self) {
        self.items.clear();
        self.current = None;
        self.status = Status::Idle;
        self.error = None;
    }

    #[cfg(test)]
    pub(crate) fn gateway_ref(&self) -> &G {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::testing::{sample_project, InMemoryGateway};

    fn store() -> EntityStore<crate::models::Project, InMemoryGateway<crate::models::Project>> {
        let gateway = InMemoryGateway::with_items(vec![
            sample_project(1, "Logo suite", crate::models::Category::Branding, false),
            sample_project(2, "App revamp", crate::models::Category::UiDesign, true),
        ]);
        EntityStore::new(gateway)
    }

    #[tokio::test]
    async fn fetch_all_replaces_the_collection_in_server_order() {
        let mut store = store();
        assert_eq!(store.status(), Status::Idle);
        store.fetch_all().await.unwrap();
        assert_eq!(store.status(), Status::Succeeded);
        let ids: Vec<u64> = store.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn fetch_by_id_only_touches_the_current_slot() {
        let mut store = store();
        store.fetch_by_id(2).await.unwrap();
        assert_eq!(store.current().unwrap().id, 2);
        assert!(store.items().is_empty());
        store.clear_current();
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn create_appends_without_touching_current() {
        let mut store = store();
        store.fetch_all().await.unwrap();
        store.fetch_by_id(1).await.unwrap();
        let draft = sample_project(0, "Poster run", crate::models::Category::Print, false).to_draft();
        let created = store.create(&draft).await.unwrap();
        assert_eq!(store.items().last().unwrap().id, created.id);
        assert_eq!(store.current().unwrap().id, 1);
    }

    #[tokio::test]
    async fn update_replaces_in_place_and_follows_current() {
        let mut store = store();
        store.fetch_all().await.unwrap();
        store.fetch_by_id(1).await.unwrap();
        let mut draft = store.items()[0].to_draft();
        draft.title = "Logo suite v2".to_string();
        store.update(1, &draft).await.unwrap();
        assert_eq!(store.items()[0].title, "Logo suite v2");
        assert_eq!(store.items()[0].id, 1);
        assert_eq!(store.current().unwrap().title, "Logo suite v2");
    }

    #[tokio::test]
    async fn update_of_unlisted_id_still_updates_current() {
        // The list was never fetched, so the collection misses the id;
        // the current slot still follows. Inherited asymmetry.
        let mut store = store();
        store.fetch_by_id(2).await.unwrap();
        let mut draft = store.current().unwrap().to_draft();
        draft.featured = false;
        store.update(2, &draft).await.unwrap();
        assert!(store.items().is_empty());
        assert!(!store.current().unwrap().featured);
    }

    #[tokio::test]
    async fn remove_drops_the_entity_and_clears_matching_current() {
        let mut store = store();
        store.fetch_all().await.unwrap();
        store.fetch_by_id(1).await.unwrap();
        store.remove(1).await.unwrap();
        assert!(store.items().iter().all(|p| p.id != 1));
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn failures_keep_prior_state_and_record_the_message() {
        let mut store = store();
        store.fetch_all().await.unwrap();
        store.gateway.fail_next(crate::errors::RemoteError::unreachable());
        let err = store.fetch_all().await.unwrap_err();
        assert_eq!(err.status, 0);
        assert_eq!(store.status(), Status::Failed);
        assert_eq!(store.error(), Some("unreachable"));
        assert_eq!(store.items().len(), 2);
    }

    #[tokio::test]
    async fn last_completed_response_wins() {
        // An update issued before a fetch but completing after it leaves
        // the update's result in place: responses apply in completion
        // order, a documented race rather than a corrected one.
        let mut store = store();
        store.fetch_all().await.unwrap(); // stale snapshot applied first
        let mut draft = store.items()[0].to_draft();
        draft.title = "Rebrand".to_string();
        store.update(1, &draft).await.unwrap(); // completes second
        assert_eq!(store.items()[0].title, "Rebrand");
    }
}
