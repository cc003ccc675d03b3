use std::sync::Arc;

use log::{debug, info};

use crate::config::ClientConfig;
use crate::models::{Comment, ContactMessage, Project, User};
use crate::persist::PersistGateway;
use crate::services::{AccountApi, ApiClient, ResourceApi, TokenSource};

use super::comments::CommentStore;
use super::contact::ContactStore;
use super::prefs::PreferenceStore;
use super::projects::ProjectStore;
use super::session::{SessionStore, TokenCell};
use super::users::UserStore;

/// Every store in the application, wired to the shared gateways.
///
/// Persistence is a whitelist: only the stores named in [`PERSISTED`]
/// write slices to the blob, the entity stores always refetch. A full
/// reset tears down the session and the cached collections but keeps the
/// preference values in memory, matching the purge semantics of the
/// persistence gateway.
///
/// [`PERSISTED`]: StoreRegistry::PERSISTED
pub struct StoreRegistry {
    pub session: SessionStore<AccountApi>,
    pub prefs: PreferenceStore,
    pub projects: ProjectStore<ResourceApi<Project>>,
    pub users: UserStore<ResourceApi<User>>,
    pub comments: CommentStore<ResourceApi<Comment>>,
    pub contact: ContactStore<ResourceApi<ContactMessage>>,
}

impl StoreRegistry {
    /// Stores whose slices survive a restart.
    pub const PERSISTED: &'static [&'static str] = &["session", "preferences"];

    pub fn is_persisted(name: &str) -> bool {
        Self::PERSISTED.contains(&name)
    }

    /// Restores persisted slices into their stores. The preference store
    /// hydrates at construction; only the session needs an explicit pass.
    pub fn hydrate(&mut self) {
        debug!("hydrating persisted stores: {:?}", Self::PERSISTED);
        self.session.hydrate();
    }

    /// Full reset on session termination: logs out (which purges the
    /// blob), drops every cached collection and clears current-item
    /// slots. Preference values stay in memory until changed again.
    pub fn reset_all(&mut self) {
        self.session.logout();
        self.projects.entity.reset();
        self.users.entity.reset();
        self.comments.entity.reset();
        self.contact.entity.reset();
        info!("stores reset");
    }
}

/// The wired application: one HTTP client, one persistence gateway, one
/// registry of stores sharing them.
pub struct App {
    pub api: Arc<ApiClient>,
    pub stores: StoreRegistry,
}

impl App {
    /// Builds the full store graph from configuration. The token cell is
    /// written by the session store and read by every request, so stores
    /// never reach into each other.
    pub fn bootstrap(config: &ClientConfig) -> anyhow::Result<App> {
        let token_cell = TokenCell::default();
        let reader = Arc::clone(&token_cell);
        let token_source: TokenSource = Arc::new(move || {
            reader
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        });

        let api = Arc::new(ApiClient::new(&config.api_base_url, token_source.clone())?);
        let persist = Arc::new(PersistGateway::open(&config.data_dir));

        let mut stores = StoreRegistry {
            session: SessionStore::new(
                AccountApi::new(Arc::clone(&api)),
                Arc::clone(&persist),
                token_cell,
            ),
            prefs: PreferenceStore::new(Arc::clone(&persist)),
            projects: ProjectStore::new(ResourceApi::new(Arc::clone(&api))),
            users: UserStore::new(ResourceApi::new(Arc::clone(&api))),
            comments: CommentStore::new(ResourceApi::new(Arc::clone(&api)), token_source),
            contact: ContactStore::new(ResourceApi::new(Arc::clone(&api))),
        };
        stores.hydrate();
        info!("client ready against {}", config.api_base_url);
        Ok(App { api, stores })
    }
}
