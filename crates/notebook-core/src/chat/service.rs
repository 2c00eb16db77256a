//! Chat service enforcing the notebook -> session -> message hierarchy.
//!
//! ChatService coordinates the ChatRepository and NotebookRepository:
//! a session is only created under an existing notebook, a message only
//! under an existing session, and every read of a transcript goes through
//! the session existence check first.

use chrono::Utc;
use notebook_types::chat::{ChatMessage, ChatMode, ChatSession, MessageRole, NewChatMessage};
use notebook_types::error::ChatError;
use notebook_types::notebook::NotebookId;
use tracing::info;
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::repository::notebook::NotebookRepository;

/// Orchestrates chat session lifecycle and message persistence.
///
/// Generic over `ChatRepository` and `NotebookRepository` to maintain
/// clean architecture (notebook-core never depends on notebook-infra).
pub struct ChatService<C: ChatRepository, N: NotebookRepository> {
    chat_repo: C,
    notebook_repo: N,
}

impl<C: ChatRepository, N: NotebookRepository> ChatService<C, N> {
    /// Create a new chat service with the given repositories.
    pub fn new(chat_repo: C, notebook_repo: N) -> Self {
        Self {
            chat_repo,
            notebook_repo,
        }
    }

    /// Access the chat repository.
    pub fn chat_repo(&self) -> &C {
        &self.chat_repo
    }

    // --- Session lifecycle ---

    /// Create a new chat session under a notebook.
    ///
    /// Fails with `NotebookNotFound` if the notebook does not exist. The
    /// session record carries its notebook linkage, so creation is a
    /// single atomic write -- there is no window where the session exists
    /// unlinked.
    pub async fn create_session(
        &self,
        notebook_id: &NotebookId,
        title: Option<String>,
    ) -> Result<ChatSession, ChatError> {
        self.notebook_repo
            .get_by_id(notebook_id)
            .await
            .map_err(storage_err)?
            .ok_or(ChatError::NotebookNotFound)?;

        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::now_v7(),
            notebook_id: notebook_id.0,
            title,
            created_at: now,
            updated_at: now,
        };

        let session = self.chat_repo.create_session(&session).await?;
        info!(session_id = %session.id, notebook_id = %notebook_id, "Chat session created");
        Ok(session)
    }

    /// Get a session by ID, failing with `SessionNotFound` if absent.
    pub async fn get_session(&self, session_id: &Uuid) -> Result<ChatSession, ChatError> {
        self.chat_repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)
    }

    /// Get a session together with its full ordered transcript.
    pub async fn get_session_with_messages(
        &self,
        session_id: &Uuid,
    ) -> Result<(ChatSession, Vec<ChatMessage>), ChatError> {
        let session = self.get_session(session_id).await?;
        let messages = self.chat_repo.get_messages(session_id, None, None).await?;
        Ok((session, messages))
    }

    /// List sessions for a notebook, without loading their messages.
    ///
    /// Listing stays O(sessions); callers fetch a transcript only when a
    /// session is opened. Fails with `NotebookNotFound` if the notebook
    /// does not exist.
    pub async fn list_sessions(
        &self,
        notebook_id: &NotebookId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatSession>, ChatError> {
        self.notebook_repo
            .get_by_id(notebook_id)
            .await
            .map_err(storage_err)?
            .ok_or(ChatError::NotebookNotFound)?;

        Ok(self
            .chat_repo
            .list_sessions(&notebook_id.0, limit, offset)
            .await?)
    }

    /// Apply a partial update to a session and return it with messages.
    ///
    /// Only a provided title overwrites the stored one; `None` leaves it
    /// untouched. `updated_at` is bumped on every successful update.
    pub async fn update_session(
        &self,
        session_id: &Uuid,
        title: Option<String>,
    ) -> Result<(ChatSession, Vec<ChatMessage>), ChatError> {
        let mut session = self.get_session(session_id).await?;

        if let Some(title) = title {
            session.title = Some(title);
        }
        session.updated_at = Utc::now();

        self.chat_repo.update_session(&session).await?;
        let messages = self.chat_repo.get_messages(session_id, None, None).await?;
        Ok((session, messages))
    }

    /// Delete a session and its messages.
    ///
    /// The cascade happens at the storage layer in one transaction; a
    /// partial delete cannot leave a session with half its transcript.
    pub async fn delete_session(&self, session_id: &Uuid) -> Result<(), ChatError> {
        self.chat_repo.delete_session(session_id).await?;
        info!(session_id = %session_id, "Chat session deleted");
        Ok(())
    }

    // --- Message persistence ---

    /// Append a message to a session's transcript.
    ///
    /// Fails with `SessionNotFound` if the session does not exist. The
    /// per-session sequence number is assigned by storage inside the
    /// insert, so the returned message carries its final position.
    pub async fn add_message(
        &self,
        session_id: &Uuid,
        role: MessageRole,
        mode: ChatMode,
        content: String,
    ) -> Result<ChatMessage, ChatError> {
        self.get_session(session_id).await?;

        let message = NewChatMessage {
            id: Uuid::now_v7(),
            session_id: *session_id,
            role,
            mode,
            content,
            created_at: Utc::now(),
        };

        Ok(self.chat_repo.save_message(&message).await?)
    }

    /// Get the ordered transcript for a session.
    ///
    /// Fails with `SessionNotFound` for a deleted or unknown session
    /// rather than returning an empty list.
    pub async fn get_messages(
        &self,
        session_id: &Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        self.get_session(session_id).await?;
        Ok(self.chat_repo.get_messages(session_id, limit, offset).await?)
    }

    /// Delete a single message by ID.
    pub async fn delete_message(&self, message_id: &Uuid) -> Result<(), ChatError> {
        self.chat_repo
            .get_message(message_id)
            .await?
            .ok_or(ChatError::MessageNotFound)?;

        self.chat_repo
            .delete_message(message_id)
            .await
            .map_err(|e| match e {
                notebook_types::error::RepositoryError::NotFound => ChatError::MessageNotFound,
                other => other.into(),
            })
    }
}

/// Map repository failures from notebook lookups without conflating a
/// repository-level NotFound with a missing session.
fn storage_err(e: notebook_types::error::RepositoryError) -> ChatError {
    match e {
        notebook_types::error::RepositoryError::Connection => ChatError::StorageUnavailable,
        other => ChatError::StorageError(other.to_string()),
    }
}
