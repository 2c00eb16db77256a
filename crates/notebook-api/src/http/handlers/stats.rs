//! Dashboard stats handler.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use notebook_core::chat::repository::ChatRepository;
use notebook_core::repository::notebook::NotebookRepository;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/stats - Entity counts for the dashboard.
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let notebooks = state
        .notebook_service
        .notebook_repo()
        .count()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let sessions = state
        .chat_service
        .chat_repo()
        .count_sessions()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let messages = state
        .chat_service
        .chat_repo()
        .count_messages()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({
            "notebooks": notebooks,
            "chat_sessions": sessions,
            "chat_messages": messages,
        }),
        request_id,
        elapsed,
    )
    .with_link("self", "/api/v1/stats");

    Ok(Json(resp))
}
