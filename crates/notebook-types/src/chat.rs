//! Chat session and message types for Open Notebook.
//!
//! Sessions are conversation threads scoped to a notebook; messages are
//! the individual turns within a session, ordered by a per-session
//! sequence counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who produced a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant', 'system'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Application context a message was produced in.
///
/// `Chat` is the notebook conversation sidebar, `Ask` a one-shot question
/// against the notebook's sources, `Edit` a draft-editing exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    Chat,
    Ask,
    Edit,
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatMode::Chat => write!(f, "chat"),
            ChatMode::Ask => write!(f, "ask"),
            ChatMode::Edit => write!(f, "edit"),
        }
    }
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" => Ok(ChatMode::Chat),
            "ask" => Ok(ChatMode::Ask),
            "edit" => Ok(ChatMode::Edit),
            other => Err(format!("invalid chat mode: '{other}'")),
        }
    }
}

impl Default for ChatMode {
    fn default() -> Self {
        ChatMode::Chat
    }
}

/// A conversation thread scoped to a single notebook.
///
/// The notebook linkage is part of the record itself, written atomically
/// with creation. `title` is optional; the HTTP layer renders a fallback
/// when it is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub notebook_id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single turn within a chat session.
///
/// Messages are immutable once created. `seq` is a per-session monotonic
/// counter assigned by storage at insert time; transcript order is defined
/// by it, never by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub seq: u32,
    pub role: MessageRole,
    pub mode: ChatMode,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A message about to be persisted, before storage assigns its `seq`.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub mode: ChatMode,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewChatMessage {
    /// Attach the storage-assigned sequence number, producing the full record.
    pub fn with_seq(self, seq: u32) -> ChatMessage {
        ChatMessage {
            id: self.id,
            session_id: self.session_id,
            seq,
            role: self.role,
            mode: self.mode,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant, MessageRole::System] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_chat_mode_roundtrip() {
        for mode in [ChatMode::Chat, ChatMode::Ask, ChatMode::Edit] {
            let s = mode.to_string();
            let parsed: ChatMode = s.parse().unwrap();
            assert_eq!(mode, parsed);
        }
    }

    #[test]
    fn test_chat_mode_rejects_unknown() {
        assert!("research".parse::<ChatMode>().is_err());
    }

    #[test]
    fn test_chat_mode_default() {
        assert_eq!(ChatMode::default(), ChatMode::Chat);
    }

    #[test]
    fn test_new_message_with_seq() {
        let new = NewChatMessage {
            id: Uuid::now_v7(),
            session_id: Uuid::now_v7(),
            role: MessageRole::User,
            mode: ChatMode::Chat,
            content: "hi".to_string(),
            created_at: Utc::now(),
        };
        let id = new.id;
        let msg = new.with_seq(3);
        assert_eq!(msg.id, id);
        assert_eq!(msg.seq, 3);
        assert_eq!(msg.content, "hi");
    }

    #[test]
    fn test_chat_session_serialize_null_title() {
        let session = ChatSession {
            id: Uuid::now_v7(),
            notebook_id: Uuid::now_v7(),
            title: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"title\":null"));
    }
}
