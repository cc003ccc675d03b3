use serde::{Deserialize, Serialize};

use super::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Account record as stored by the backing collection. The password is
/// plaintext in the mock data store; it never leaves this type except
/// through [`User::public`], which strips it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// Account identity safe to hold in session state and persist: the same
/// record without the password field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl Resource for User {
    type Draft = UserDraft;

    const PATH: &'static str = "users";
    const NAME: &'static str = "user";

    fn id(&self) -> u64 {
        self.id
    }
}

impl User {
    /// Replacement payload for a full update, e.g. an independent password
    /// change from the admin user form.
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}
