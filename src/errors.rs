//! Error taxonomy for the data layer.
//!
//! Gateway failures are normalized into [`RemoteError`] regardless of
//! whether the server answered, the network dropped the request or the
//! request could not even be built. Pre-flight checks performed on the
//! client (uniqueness, auth requirements) surface as [`ValidationError`],
//! login failures as [`CredentialError`]. Nothing here is retried
//! automatically; stores record the failure and flip their status.

use thiserror::Error;

/// Transport or server failure from the remote REST surface.
///
/// `status` is the HTTP status code, or `0` when no response was received
/// (network failure) or the request could not be constructed.
#[derive(Debug, Clone, Error)]
#[error("remote request failed ({status}): {message}")]
pub struct RemoteError {
    pub status: u16,
    pub message: String,
    /// Raw per-field errors as returned by the server, when present.
    pub server_errors: Option<serde_json::Value>,
}

impl RemoteError {
    pub fn unreachable() -> Self {
        Self {
            status: 0,
            message: "unreachable".to_string(),
            server_errors: None,
        }
    }

    /// Request never left the client (builder or URL failure).
    pub fn construction(cause: impl ToString) -> Self {
        Self {
            status: 0,
            message: cause.to_string(),
            server_errors: None,
        }
    }
}

/// Client-side pre-flight check failures, raised before any write is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),
    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),
    #[error("authentication required")]
    AuthenticationRequired,
}

/// Login failures. `UserNotFound` and `InvalidCredentials` are distinct so
/// the credential form can phrase them differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("user not found")]
    UserNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Lookup miss on an entity that was expected to exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{resource} {id} not found")]
pub struct NotFoundError {
    pub resource: &'static str,
    pub id: u64,
}

/// Umbrella error for every operation exposed by the stores.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}
