//! Chat session CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/notebooks/{id}/chat-sessions - List sessions for a notebook
//! - POST   /api/v1/notebooks/{id}/chat-sessions - Create a session
//! - GET    /api/v1/chat-sessions/{id}           - Get a session with its transcript
//! - PUT    /api/v1/chat-sessions/{id}           - Update a session title
//! - DELETE /api/v1/chat-sessions/{id}           - Delete a session and its messages

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use notebook_types::chat::{ChatMessage, ChatSession};
use notebook_types::notebook::NotebookId;

use crate::http::error::AppError;
use crate::http::handlers::message::ChatMessageView;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Fallback title for sessions the user never named.
const UNTITLED: &str = "Untitled Chat";

/// Request body for creating a session.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub title: Option<String>,
}

/// Request body for updating a session. An omitted title leaves the
/// stored value untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSessionRequest {
    pub title: Option<String>,
}

/// Wire representation of a session, with the untitled fallback applied
/// and timestamps as text. List views carry an empty `messages` array.
#[derive(Debug, Serialize)]
pub struct ChatSessionView {
    pub id: String,
    pub notebook_id: String,
    pub title: String,
    pub created: String,
    pub updated: String,
    pub messages: Vec<ChatMessageView>,
}

impl ChatSessionView {
    pub fn from_session(session: &ChatSession, messages: &[ChatMessage]) -> Self {
        Self {
            id: session.id.to_string(),
            notebook_id: session.notebook_id.to_string(),
            title: session
                .title
                .clone()
                .unwrap_or_else(|| UNTITLED.to_string()),
            created: session.created_at.to_rfc3339(),
            updated: session.updated_at.to_rfc3339(),
            messages: messages.iter().map(ChatMessageView::from_message).collect(),
        }
    }
}

/// GET /api/v1/notebooks/{id}/chat-sessions - List sessions for a notebook.
///
/// Messages are not loaded for the list view.
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(notebook_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ChatSessionView>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let nid = NotebookId::from_uuid(parse_uuid(&notebook_id)?);

    let sessions = state.chat_service.list_sessions(&nid, None, None).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let views: Vec<ChatSessionView> = sessions
        .iter()
        .map(|s| ChatSessionView::from_session(s, &[]))
        .collect();

    let resp = ApiResponse::success(views, request_id, elapsed).with_link(
        "self",
        &format!("/api/v1/notebooks/{notebook_id}/chat-sessions"),
    );

    Ok(Json(resp))
}

/// POST /api/v1/notebooks/{id}/chat-sessions - Create a session.
pub async fn create_session(
    State(state): State<AppState>,
    Path(notebook_id): Path<String>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<ApiResponse<ChatSessionView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let nid = NotebookId::from_uuid(parse_uuid(&notebook_id)?);

    let session = state.chat_service.create_session(&nid, body.title).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        ChatSessionView::from_session(&session, &[]),
        request_id,
        elapsed,
    )
    .with_link("self", &format!("/api/v1/chat-sessions/{}", session.id));

    Ok(Json(resp))
}

/// GET /api/v1/chat-sessions/{id} - Get a session with its ordered transcript.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<ChatSessionView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    let (session, messages) = state.chat_service.get_session_with_messages(&sid).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        ChatSessionView::from_session(&session, &messages),
        request_id,
        elapsed,
    )
    .with_link("self", &format!("/api/v1/chat-sessions/{}", session.id))
    .with_link(
        "notebook",
        &format!("/api/v1/notebooks/{}", session.notebook_id),
    );

    Ok(Json(resp))
}

/// PUT /api/v1/chat-sessions/{id} - Partially update a session.
pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<UpdateSessionRequest>,
) -> Result<Json<ApiResponse<ChatSessionView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    let (session, messages) = state.chat_service.update_session(&sid, body.title).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        ChatSessionView::from_session(&session, &messages),
        request_id,
        elapsed,
    )
    .with_link("self", &format!("/api/v1/chat-sessions/{}", session.id));

    Ok(Json(resp))
}

/// DELETE /api/v1/chat-sessions/{id} - Delete a session and its messages.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    state.chat_service.delete_session(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "id": session_id}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_view_applies_untitled_fallback() {
        let session = ChatSession {
            id: Uuid::now_v7(),
            notebook_id: Uuid::now_v7(),
            title: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = ChatSessionView::from_session(&session, &[]);
        assert_eq!(view.title, "Untitled Chat");
        assert!(view.messages.is_empty());
    }

    #[test]
    fn test_view_keeps_explicit_title() {
        let session = ChatSession {
            id: Uuid::now_v7(),
            notebook_id: Uuid::now_v7(),
            title: Some("Lit review".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = ChatSessionView::from_session(&session, &[]);
        assert_eq!(view.title, "Lit review");
    }
}
