//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `notebook-core` using sqlx with split
//! read/write pools. Follows the same patterns as `SqliteNotebookRepository`:
//! raw queries, private Row structs, split reader/writer pool usage.
//!
//! Message inserts compute the per-session `seq` inside the INSERT itself.
//! The single-connection writer pool serializes writes, so the counter
//! cannot race between concurrent appends to the same session.

use chrono::{DateTime, Utc};
use notebook_core::chat::repository::ChatRepository;
use notebook_types::chat::{ChatMessage, ChatMode, ChatSession, MessageRole, NewChatMessage};
use notebook_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::map_sqlx_err;
use super::notebook::{format_datetime, parse_datetime};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain ChatSession.
struct ChatSessionRow {
    id: String,
    notebook_id: String,
    title: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            notebook_id: row.try_get("notebook_id")?,
            title: row.try_get("title")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;
        let notebook_id = Uuid::parse_str(&self.notebook_id)
            .map_err(|e| RepositoryError::Query(format!("invalid notebook_id: {e}")))?;

        Ok(ChatSession {
            id,
            notebook_id,
            title: self.title,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

/// Internal row type for mapping SQLite rows to domain ChatMessage.
struct ChatMessageRow {
    id: String,
    session_id: String,
    seq: i64,
    role: String,
    mode: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            seq: row.try_get("seq")?,
            role: row.try_get("role")?,
            mode: row.try_get("mode")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let session_id = Uuid::parse_str(&self.session_id)
            .map_err(|e| RepositoryError::Query(format!("invalid session_id: {e}")))?;
        let role: MessageRole = self
            .role
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let mode: ChatMode = self
            .mode
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        Ok(ChatMessage {
            id,
            session_id,
            seq: self.seq as u32,
            role,
            mode,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO chat_sessions (id, notebook_id, title, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(session.notebook_id.to_string())
        .bind(&session.title)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_err)?;

        Ok(session.clone())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        match row {
            Some(row) => {
                let session_row = ChatSessionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn list_sessions(
        &self,
        notebook_id: &Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let mut sql =
            String::from("SELECT * FROM chat_sessions WHERE notebook_id = ? ORDER BY updated_at DESC");

        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let rows = sqlx::query(&sql)
            .bind(notebook_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                ChatSessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }

    async fn update_session(&self, session: &ChatSession) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE chat_sessions SET title = ?, updated_at = ? WHERE id = ?"#,
        )
        .bind(&session.title)
        .bind(format_datetime(&session.updated_at))
        .bind(session.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        // Messages go with the session via ON DELETE CASCADE, inside the
        // same implicit transaction as the parent delete.
        let result = sqlx::query("DELETE FROM chat_sessions WHERE id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn save_message(&self, message: &NewChatMessage) -> Result<ChatMessage, RepositoryError> {
        let row = sqlx::query(
            r#"INSERT INTO chat_messages (id, session_id, seq, role, mode, content, created_at)
               VALUES (?, ?, (SELECT COALESCE(MAX(seq) + 1, 0) FROM chat_messages WHERE session_id = ?), ?, ?, ?, ?)
               RETURNING seq"#,
        )
        .bind(message.id.to_string())
        .bind(message.session_id.to_string())
        .bind(message.session_id.to_string())
        .bind(message.role.to_string())
        .bind(message.mode.to_string())
        .bind(&message.content)
        .bind(format_datetime(&message.created_at))
        .fetch_one(&self.pool.writer)
        .await
        .map_err(map_sqlx_err)?;

        let seq: i64 = row
            .try_get("seq")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(message.clone().with_seq(seq as u32))
    }

    async fn get_message(&self, message_id: &Uuid) -> Result<Option<ChatMessage>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM chat_messages WHERE id = ?")
            .bind(message_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        match row {
            Some(row) => {
                let msg_row = ChatMessageRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(msg_row.into_message()?))
            }
            None => Ok(None),
        }
    }

    async fn get_messages(
        &self,
        session_id: &Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut sql =
            String::from("SELECT * FROM chat_messages WHERE session_id = ? ORDER BY seq ASC");

        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let rows = sqlx::query(&sql)
            .bind(session_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let msg_row =
                ChatMessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(msg_row.into_message()?);
        }

        Ok(messages)
    }

    async fn delete_message(&self, message_id: &Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE id = ?")
            .bind(message_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn count_sessions(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chat_sessions")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }

    async fn count_messages(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chat_messages")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::notebook::SqliteNotebookRepository;
    use crate::sqlite::pool::DatabasePool;
    use notebook_core::chat::service::ChatService;
    use notebook_core::repository::notebook::NotebookRepository;
    use notebook_types::error::ChatError;
    use notebook_types::notebook::{Notebook, NotebookId};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn seed_notebook(pool: &DatabasePool) -> NotebookId {
        let now = Utc::now();
        let notebook = Notebook {
            id: NotebookId::new(),
            name: "Test notebook".to_string(),
            description: String::new(),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        SqliteNotebookRepository::new(pool.clone())
            .create(&notebook)
            .await
            .unwrap();
        notebook.id
    }

    fn make_session(notebook_id: &NotebookId) -> ChatSession {
        let now = Utc::now();
        ChatSession {
            id: Uuid::now_v7(),
            notebook_id: notebook_id.0,
            title: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn make_message(session_id: Uuid, role: MessageRole, content: &str) -> NewChatMessage {
        NewChatMessage {
            id: Uuid::now_v7(),
            session_id,
            role,
            mode: ChatMode::Chat,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        let session = make_session(&notebook_id);
        let created = repo.create_session(&session).await.unwrap();
        assert_eq!(created.id, session.id);

        let found = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(found.notebook_id, notebook_id.0);
        assert!(found.title.is_none());
    }

    #[tokio::test]
    async fn test_fresh_session_has_no_messages() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        let session = make_session(&notebook_id);
        repo.create_session(&session).await.unwrap();

        let messages = repo.get_messages(&session.id, None, None).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_create_session_under_missing_notebook_is_rejected() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());

        // No notebook row -- the FK check rejects the insert outright, so
        // a half-created, unlinked session can never exist.
        let session = make_session(&NotebookId::new());
        let err = repo.create_session(&session).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));

        assert!(repo.get_session(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_messages_preserve_insertion_order() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        let session = make_session(&notebook_id);
        repo.create_session(&session).await.unwrap();

        let m1 = repo
            .save_message(&make_message(session.id, MessageRole::User, "first"))
            .await
            .unwrap();
        let m2 = repo
            .save_message(&make_message(session.id, MessageRole::Assistant, "second"))
            .await
            .unwrap();
        let m3 = repo
            .save_message(&make_message(session.id, MessageRole::User, "third"))
            .await
            .unwrap();

        assert_eq!(m1.seq, 0);
        assert_eq!(m2.seq, 1);
        assert_eq!(m3.seq, 2);

        let messages = repo.get_messages(&session.id, None, None).await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_seq_is_per_session() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        let s1 = make_session(&notebook_id);
        let s2 = make_session(&notebook_id);
        repo.create_session(&s1).await.unwrap();
        repo.create_session(&s2).await.unwrap();

        repo.save_message(&make_message(s1.id, MessageRole::User, "a"))
            .await
            .unwrap();
        let first_in_s2 = repo
            .save_message(&make_message(s2.id, MessageRole::User, "b"))
            .await
            .unwrap();

        assert_eq!(first_in_s2.seq, 0);
    }

    #[tokio::test]
    async fn test_update_session_title() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        let mut session = make_session(&notebook_id);
        repo.create_session(&session).await.unwrap();

        session.title = Some("Renamed".to_string());
        session.updated_at = Utc::now();
        repo.update_session(&session).await.unwrap();

        let found = repo.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("Renamed"));
    }

    #[tokio::test]
    async fn test_delete_session_cascades_messages() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        let session = make_session(&notebook_id);
        repo.create_session(&session).await.unwrap();

        let msg = repo
            .save_message(&make_message(session.id, MessageRole::User, "hello"))
            .await
            .unwrap();

        repo.delete_session(&session.id).await.unwrap();

        assert!(repo.get_session(&session.id).await.unwrap().is_none());
        assert!(repo.get_message(&msg.id).await.unwrap().is_none());
        assert_eq!(repo.count_messages().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_notebook_cascades_sessions_and_messages() {
        let pool = test_pool().await;
        let notebook_repo = SqliteNotebookRepository::new(pool.clone());
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        let session = make_session(&notebook_id);
        repo.create_session(&session).await.unwrap();
        repo.save_message(&make_message(session.id, MessageRole::User, "hi"))
            .await
            .unwrap();

        notebook_repo.delete(&notebook_id).await.unwrap();

        assert!(repo.get_session(&session.id).await.unwrap().is_none());
        assert_eq!(repo.count_sessions().await.unwrap(), 0);
        assert_eq!(repo.count_messages().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_single_message_keeps_order() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        let session = make_session(&notebook_id);
        repo.create_session(&session).await.unwrap();

        repo.save_message(&make_message(session.id, MessageRole::User, "a"))
            .await
            .unwrap();
        let middle = repo
            .save_message(&make_message(session.id, MessageRole::Assistant, "b"))
            .await
            .unwrap();
        repo.save_message(&make_message(session.id, MessageRole::User, "c"))
            .await
            .unwrap();

        repo.delete_message(&middle.id).await.unwrap();

        let messages = repo.get_messages(&session.id, None, None).await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_list_sessions_excludes_messages_cost() {
        let pool = test_pool().await;
        let repo = SqliteChatRepository::new(pool.clone());
        let notebook_id = seed_notebook(&pool).await;

        for _ in 0..3 {
            let session = make_session(&notebook_id);
            repo.create_session(&session).await.unwrap();
        }

        let all = repo.list_sessions(&notebook_id.0, None, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let page = repo
            .list_sessions(&notebook_id.0, Some(2), Some(0))
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Service-level behavior over the real repositories
    // -----------------------------------------------------------------------

    fn service(pool: &DatabasePool) -> ChatService<SqliteChatRepository, SqliteNotebookRepository> {
        ChatService::new(
            SqliteChatRepository::new(pool.clone()),
            SqliteNotebookRepository::new(pool.clone()),
        )
    }

    #[tokio::test]
    async fn test_service_create_session_missing_notebook() {
        let pool = test_pool().await;
        let svc = service(&pool);

        let err = svc
            .create_session(&NotebookId::new(), Some("orphan".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotebookNotFound));
    }

    #[tokio::test]
    async fn test_service_update_title_partial_semantics() {
        let pool = test_pool().await;
        let svc = service(&pool);
        let notebook_id = seed_notebook(&pool).await;

        let session = svc
            .create_session(&notebook_id, Some("Original".to_string()))
            .await
            .unwrap();

        // Omitted title leaves the stored value untouched.
        let (unchanged, _) = svc.update_session(&session.id, None).await.unwrap();
        assert_eq!(unchanged.title.as_deref(), Some("Original"));

        // An explicit title, even empty, overwrites.
        let (cleared, _) = svc
            .update_session(&session.id, Some(String::new()))
            .await
            .unwrap();
        assert_eq!(cleared.title.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_service_transcript_after_delete_is_not_found() {
        let pool = test_pool().await;
        let svc = service(&pool);
        let notebook_id = seed_notebook(&pool).await;

        let session = svc.create_session(&notebook_id, None).await.unwrap();
        svc.add_message(&session.id, MessageRole::User, ChatMode::Chat, "hi".to_string())
            .await
            .unwrap();

        svc.delete_session(&session.id).await.unwrap();

        // A deleted session's transcript is gone, not empty.
        let err = svc.get_messages(&session.id, None, None).await.unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound));
    }

    #[tokio::test]
    async fn test_service_end_to_end_transcript() {
        let pool = test_pool().await;
        let svc = service(&pool);
        let notebook_id = seed_notebook(&pool).await;

        let session = svc
            .create_session(&notebook_id, Some("Untitled".to_string()))
            .await
            .unwrap();

        svc.add_message(&session.id, MessageRole::User, ChatMode::Chat, "hi".to_string())
            .await
            .unwrap();

        let (found, messages) = svc.get_session_with_messages(&session.id).await.unwrap();
        assert_eq!(found.id, session.id);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[0].seq, 0);
    }

    #[tokio::test]
    async fn test_service_delete_message() {
        let pool = test_pool().await;
        let svc = service(&pool);
        let notebook_id = seed_notebook(&pool).await;

        let session = svc.create_session(&notebook_id, None).await.unwrap();
        let msg = svc
            .add_message(&session.id, MessageRole::User, ChatMode::Ask, "q".to_string())
            .await
            .unwrap();

        svc.delete_message(&msg.id).await.unwrap();

        let err = svc.delete_message(&msg.id).await.unwrap_err();
        assert!(matches!(err, ChatError::MessageNotFound));
    }
}
