use thiserror::Error;

/// Errors related to notebook operations.
#[derive(Debug, Error)]
pub enum NotebookError {
    #[error("notebook not found")]
    NotFound,

    #[error("invalid notebook name: {0}")]
    InvalidName(String),

    #[error("storage unavailable")]
    StorageUnavailable,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to chat session and message operations.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("notebook not found")]
    NotebookNotFound,

    #[error("chat session not found")]
    SessionNotFound,

    #[error("chat message not found")]
    MessageNotFound,

    #[error("storage unavailable")]
    StorageUnavailable,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in notebook-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for NotebookError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => NotebookError::NotFound,
            RepositoryError::Connection => NotebookError::StorageUnavailable,
            other => NotebookError::StorageError(other.to_string()),
        }
    }
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ChatError::SessionNotFound,
            RepositoryError::Connection => ChatError::StorageUnavailable,
            other => ChatError::StorageError(other.to_string()),
        }
    }
}
