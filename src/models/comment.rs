use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Resource;

/// Visitor comment attached to a project. Displayed newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub project_id: u64,
    /// Display name of the author; the account id is carried separately
    /// when the author was signed in.
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub project_id: u64,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl Resource for Comment {
    type Draft = CommentDraft;

    const PATH: &'static str = "comments";
    const NAME: &'static str = "comment";

    fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_user_id_is_omitted_from_payload() {
        let draft = CommentDraft {
            project_id: 7,
            author: "visitor".into(),
            content: "lovely work".into(),
            user_id: None,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("userId").is_none());
        assert_eq!(value["projectId"], 7);
    }
}
