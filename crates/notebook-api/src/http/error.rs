//! Application error type mapping to HTTP status codes and envelope format.
//!
//! The access layer exposes a closed error taxonomy; each kind gets its
//! own status code so callers can tell a caller mistake (404/400) from a
//! retryable storage outage (503) or a genuine server fault (500).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use notebook_types::error::{ChatError, NotebookError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Notebook-related errors.
    Notebook(NotebookError),
    /// Chat session/message errors.
    Chat(ChatError),
    /// Validation error (malformed identifiers, bad parameters).
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<NotebookError> for AppError {
    fn from(e: NotebookError) -> Self {
        AppError::Notebook(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Notebook(NotebookError::NotFound) => (
                StatusCode::NOT_FOUND,
                "NOTEBOOK_NOT_FOUND",
                "Notebook not found".to_string(),
            ),
            AppError::Notebook(NotebookError::InvalidName(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Notebook(NotebookError::StorageUnavailable)
            | AppError::Chat(ChatError::StorageUnavailable) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                "Storage backend unavailable".to_string(),
            ),
            AppError::Notebook(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "NOTEBOOK_ERROR",
                e.to_string(),
            ),
            AppError::Chat(ChatError::NotebookNotFound) => (
                StatusCode::NOT_FOUND,
                "NOTEBOOK_NOT_FOUND",
                "Notebook not found".to_string(),
            ),
            AppError::Chat(ChatError::SessionNotFound) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Chat session not found".to_string(),
            ),
            AppError::Chat(ChatError::MessageNotFound) => (
                StatusCode::NOT_FOUND,
                "MESSAGE_NOT_FOUND",
                "Chat message not found".to_string(),
            ),
            AppError::Chat(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CHAT_ERROR",
                e.to_string(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds_map_to_404() {
        for err in [
            AppError::Notebook(NotebookError::NotFound),
            AppError::Chat(ChatError::NotebookNotFound),
            AppError::Chat(ChatError::SessionNotFound),
            AppError::Chat(ChatError::MessageNotFound),
        ] {
            assert_eq!(err.parts().0, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_unavailable_maps_to_503() {
        let err = AppError::Chat(ChatError::StorageUnavailable);
        assert_eq!(err.parts().0, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Validation("Invalid UUID: zzz".to_string());
        let (status, code, _) = err.parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_storage_fault_maps_to_500() {
        let err = AppError::Chat(ChatError::StorageError("disk full".to_string()));
        assert_eq!(err.parts().0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
