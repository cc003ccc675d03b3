use crate::models::{Category, CategoryFilter, Project};
use crate::services::ResourceGateway;

use super::entity::EntityStore;

/// Project store: the entity collection plus the listing-page category
/// selection and the derived views built on it. Views are pure reads over
/// current state, recomputed on every call.
pub struct ProjectStore<G: ResourceGateway<Project>> {
    pub entity: EntityStore<Project, G>,
    filter: CategoryFilter,
}

impl<G: ResourceGateway<Project>> ProjectStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            entity: EntityStore::new(gateway),
            filter: CategoryFilter::All,
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// Projects flagged for the home-page showcase, in collection order.
    pub fn featured(&self) -> Vec<&Project> {
        self.entity
            .items()
            .iter()
            .filter(|p| p.featured)
            .collect()
    }

    /// Collection view under the given filter, preserving relative order.
    /// `CategoryFilter::All` is the identity.
    pub fn filtered_by_category(&self, filter: CategoryFilter) -> Vec<&Project> {
        self.entity
            .items()
            .iter()
            .filter(|p| filter.matches(p.category))
            .collect()
    }

    /// The listing view under the currently selected filter.
    pub fn filtered(&self) -> Vec<&Project> {
        self.filtered_by_category(self.filter)
    }

    pub fn by_category_count(&self, category: Category) -> usize {
        self.filtered_by_category(CategoryFilter::Only(category)).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::testing::{sample_project, InMemoryGateway};

    fn seeded_store() -> ProjectStore<InMemoryGateway<Project>> {
        ProjectStore::new(InMemoryGateway::with_items(vec![
            sample_project(1, "Logo suite", Category::Branding, true),
            sample_project(2, "App revamp", Category::UiDesign, false),
            sample_project(3, "Campaign", Category::SocialMedia, false),
            sample_project(4, "Rebrand", Category::Branding, false),
            sample_project(5, "Reel pack", Category::Motion, true),
        ]))
    }

    #[tokio::test]
    async fn category_filter_preserves_relative_order() {
        let mut store = seeded_store();
        store.entity.fetch_all().await.unwrap();
        let branding = store.filtered_by_category(CategoryFilter::Only(Category::Branding));
        let ids: Vec<u64> = branding.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(store.by_category_count(Category::Branding), 2);
    }

    #[tokio::test]
    async fn all_filter_is_the_identity() {
        let mut store = seeded_store();
        store.entity.fetch_all().await.unwrap();
        assert_eq!(store.filtered_by_category(CategoryFilter::All).len(), 5);
        store.set_filter(CategoryFilter::Only(Category::Motion));
        assert_eq!(store.filtered().len(), 1);
    }

    #[tokio::test]
    async fn featured_reflects_the_flag_only() {
        let mut store = seeded_store();
        store.entity.fetch_all().await.unwrap();
        let ids: Vec<u64> = store.featured().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[tokio::test]
    async fn views_recompute_after_mutations() {
        let mut store = seeded_store();
        store.entity.fetch_all().await.unwrap();
        let mut draft = store.entity.items()[1].to_draft();
        draft.featured = true;
        store.entity.update(2, &draft).await.unwrap();
        let ids: Vec<u64> = store.featured().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);
    }
}
