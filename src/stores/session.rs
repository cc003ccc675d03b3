use std::sync::{Arc, RwLock};

use log::{info, warn};

use crate::errors::{ClientError, CredentialError, ValidationError};
use crate::models::{PublicUser, Role, UserDraft};
use crate::persist::{PersistGateway, SessionSlice};
use crate::services::AccountGateway;
use crate::utils::token;

use super::entity::Status;

/// Shared token cell: the session store writes it, the gateway's token
/// source reads it on every request.
pub type TokenCell = Arc<RwLock<Option<String>>>;

/// Signup form data. The role is never taken from the form; new accounts
/// always start as [`Role::User`].
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
}

/// Authenticated identity and its lifecycle.
///
/// Invariant: the store is authenticated exactly when the token cell
/// holds a token; identity and token are always written together.
pub struct SessionStore<G: AccountGateway> {
    gateway: G,
    persist: Arc<PersistGateway>,
    token: TokenCell,
    user: Option<PublicUser>,
    status: Status,
    error: Option<String>,
}

impl<G: AccountGateway> SessionStore<G> {
    pub fn new(gateway: G, persist: Arc<PersistGateway>, token: TokenCell) -> Self {
        Self {
            gateway,
            persist,
            token,
            user: None,
            status: Status::Idle,
            error: None,
        }
    }

    /// Restores a persisted session before first use. No-op when the
    /// blob has no session slice.
    pub fn hydrate(&mut self) {
        if let Some(slice) = self.persist.session() {
            info!("restored session for '{}'", slice.user.username);
            self.set_authenticated(slice.user, slice.token);
        }
    }

    pub fn current_user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<String> {
        self.read_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_admin())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Resets only the error field, e.g. when the user resumes typing in
    /// the credential form.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Authenticates against the account directory. There is no login
    /// endpoint: the account is looked up by username and the password
    /// compared client-side, plaintext, as the backend contract demands.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<PublicUser, ClientError> {
        self.status = Status::Loading;
        self.error = None;
        let account = match self.gateway.find_by_username(username).await {
            Ok(found) => found,
            Err(e) => return Err(self.fail(e.into())),
        };
        let Some(account) = account else {
            return Err(self.fail(CredentialError::UserNotFound.into()));
        };
        if account.password != password {
            return Err(self.fail(CredentialError::InvalidCredentials.into()));
        }

        let session_token = token::derive(username, password);
        let identity = account.public();
        self.set_authenticated(identity.clone(), session_token);
        self.save();
        self.status = Status::Succeeded;
        info!("'{}' logged in", identity.username);
        Ok(identity)
    }

    /// Creates an account after two sequential uniqueness pre-checks,
    /// then authenticates it. Either duplicate fails before anything is
    /// written.
    pub async fn register(&mut self, form: SignupForm) -> Result<PublicUser, ClientError> {
        self.status = Status::Loading;
        self.error = None;
        match self.gateway.find_by_username(&form.username).await {
            Ok(Some(_)) => {
                return Err(self.fail(ValidationError::DuplicateUsername(form.username).into()))
            }
            Ok(None) => {}
            Err(e) => return Err(self.fail(e.into())),
        }
        match self.gateway.find_by_email(&form.email).await {
            Ok(Some(_)) => {
                return Err(self.fail(ValidationError::DuplicateEmail(form.email).into()))
            }
            Ok(None) => {}
            Err(e) => return Err(self.fail(e.into())),
        }

        let draft = UserDraft {
            username: form.username,
            password: form.password,
            email: form.email,
            name: form.name,
            role: Role::User,
        };
        let created = match self.gateway.create_account(&draft).await {
            Ok(user) => user,
            Err(e) => return Err(self.fail(e.into())),
        };

        let session_token = token::derive(&created.username, &created.password);
        let identity = created.public();
        self.set_authenticated(identity.clone(), session_token);
        self.save();
        self.status = Status::Succeeded;
        info!("registered '{}'", identity.username);
        Ok(identity)
    }

    /// Ends the session: clears identity and token together and purges
    /// the entire persisted blob, not just the session slice. Always
    /// succeeds; an in-flight authenticated request may still complete
    /// with the stale token, which the server is free to reject.
    pub fn logout(&mut self) {
        self.user = None;
        self.write_token(None);
        self.status = Status::Idle;
        self.error = None;
        if let Err(e) = self.persist.purge() {
            warn!("failed to purge persisted state: {e}");
        }
        info!("session ended");
    }

    fn set_authenticated(&mut self, user: PublicUser, session_token: String) {
        self.user = Some(user);
        self.write_token(Some(session_token));
    }

    fn save(&self) {
        let slice = self.user.clone().zip(self.read_token()).map(|(user, token)| {
            SessionSlice { user, token }
        });
        if let Err(e) = self.persist.save_session(slice) {
            // Non-fatal: the session lives on in memory for this run.
            warn!("failed to persist session: {e}");
        }
    }

    fn fail(&mut self, err: ClientError) -> ClientError {
        self.status = Status::Failed;
        self.error = Some(err.to_string());
        err
    }

    fn read_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn write_token(&self, value: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = value;
    }
}
