//! State containers for the application.
//!
//! Each store exclusively owns its slice: four entity stores (projects,
//! users, comments, contact submissions), the session store and the
//! preference store. UI-level actions call store operations, the stores
//! call the gateway, and derived views recompute from current state on
//! every read.

pub mod comments;
pub mod contact;
pub mod entity;
pub mod prefs;
pub mod projects;
pub mod registry;
pub mod session;
pub mod users;

pub use comments::CommentStore;
pub use contact::ContactStore;
pub use entity::{EntityStore, Status};
pub use prefs::{Language, PreferenceStore};
pub use projects::ProjectStore;
pub use registry::{App, StoreRegistry};
pub use session::{SessionStore, SignupForm, TokenCell};
pub use users::UserStore;
