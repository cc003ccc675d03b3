use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;

/// Triage state of a contact submission, advanced by the admin tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
}

/// Message sent through the public contact form. Write-only for visitors;
/// the admin back office lists and re-statuses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Present when the sender was signed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
}

impl Resource for ContactMessage {
    type Draft = ContactDraft;

    const PATH: &'static str = "contact";
    const NAME: &'static str = "contact message";

    fn id(&self) -> u64 {
        self.id
    }
}

impl ContactMessage {
    /// Replacement payload used when the admin advances the status; the
    /// update endpoint is a full replace, so every field rides along.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            user_id: self.user_id,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_new() {
        let raw = r#"{
            "id": 1,
            "name": "Lina",
            "email": "l@x.com",
            "message": "Hi",
            "createdAt": "2025-05-01T10:00:00Z"
        }"#;
        let msg: ContactMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.status, ContactStatus::New);
        assert_eq!(msg.user_id, None);
    }
}
