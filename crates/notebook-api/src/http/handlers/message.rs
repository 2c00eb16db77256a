//! Chat message HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/chat-sessions/{id}/messages - Append a message to a session
//! - DELETE /api/v1/messages/{id}               - Delete a single message

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use notebook_types::chat::{ChatMessage, ChatMode, MessageRole};

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for appending a message to a session.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub role: MessageRole,
    /// Application context tag; defaults to the chat sidebar.
    #[serde(default)]
    pub mode: ChatMode,
    pub content: String,
}

/// Wire representation of a message: timestamps as text, seq implicit in
/// the array position of transcript responses.
#[derive(Debug, Serialize)]
pub struct ChatMessageView {
    pub id: String,
    pub role: MessageRole,
    pub mode: ChatMode,
    pub content: String,
    pub created: String,
}

impl ChatMessageView {
    pub fn from_message(msg: &ChatMessage) -> Self {
        Self {
            id: msg.id.to_string(),
            role: msg.role,
            mode: msg.mode,
            content: msg.content.clone(),
            created: msg.created_at.to_rfc3339(),
        }
    }
}

/// POST /api/v1/chat-sessions/{id}/messages - Append a message.
pub async fn add_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<CreateMessageRequest>,
) -> Result<Json<ApiResponse<ChatMessageView>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    let message = state
        .chat_service
        .add_message(&sid, body.role, body.mode, body.content)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        ChatMessageView::from_message(&message),
        request_id,
        elapsed,
    )
    .with_link("session", &format!("/api/v1/chat-sessions/{session_id}"));

    Ok(Json(resp))
}

/// DELETE /api/v1/messages/{id} - Delete a single message.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let mid = parse_uuid(&message_id)?;
    state.chat_service.delete_message(&mid).await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "id": message_id}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
