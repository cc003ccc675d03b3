//! Wire-level data model for the portfolio backend.
//!
//! All payloads use camelCase field names to match the REST surface.
//! Identifiers are server-assigned; creation payloads are the `*Draft`
//! types, which carry every field except `id`.

pub mod comment;
pub mod contact;
pub mod project;
pub mod user;

pub use comment::{Comment, CommentDraft};
pub use contact::{ContactDraft, ContactMessage, ContactStatus};
pub use project::{Category, CategoryFilter, Project, ProjectDraft};
pub use user::{PublicUser, Role, User, UserDraft};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A REST resource: its collection path and how to read its identity.
///
/// `Draft` is the client-built creation/replacement payload; the server
/// assigns `id` and echoes the stored entity back.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Draft: Serialize + Send + Sync;

    /// Collection path relative to the API base URL, e.g. `"projects"`.
    const PATH: &'static str;

    /// Human-readable resource name for error reporting.
    const NAME: &'static str;

    fn id(&self) -> u64;
}
