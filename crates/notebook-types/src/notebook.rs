use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a notebook, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotebookId(pub Uuid);

impl NotebookId {
    /// Create a new NotebookId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a NotebookId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for NotebookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotebookId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A notebook: the top-level workspace grouping chat sessions.
///
/// Notebooks are created explicitly by the user, can be renamed and
/// archived, and own their chat sessions. Deleting a notebook removes
/// its sessions and their messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub id: NotebookId,
    /// Display name (non-empty after trimming).
    pub name: String,
    /// Freeform description, may be empty. Fed to the assistant as context.
    pub description: String,
    /// Archived notebooks are hidden from default listings but keep all data.
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new notebook. Only `name` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotebookRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update for a notebook. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNotebookRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub archived: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notebook_id_display_roundtrip() {
        let id = NotebookId::new();
        let s = id.to_string();
        let parsed: NotebookId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_notebook_id_serializes_as_uuid_string() {
        let id = NotebookId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
    }

    #[test]
    fn test_notebook_serialize() {
        let notebook = Notebook {
            id: NotebookId::new(),
            name: "Thesis research".to_string(),
            description: String::new(),
            archived: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&notebook).unwrap();
        assert!(json.contains("\"archived\":false"));
        assert!(json.contains("Thesis research"));
    }

    #[test]
    fn test_update_request_default_is_all_none() {
        let req = UpdateNotebookRequest::default();
        assert!(req.name.is_none());
        assert!(req.description.is_none());
        assert!(req.archived.is_none());
    }
}
