//! Notebook repository trait definition.

use notebook_types::error::RepositoryError;
use notebook_types::notebook::{Notebook, NotebookId};

use super::SortOrder;

/// Filter criteria for listing notebooks.
#[derive(Debug, Clone, Default)]
pub struct NotebookFilter {
    /// Filter by archived flag. `None` returns both.
    pub archived: Option<bool>,
    /// Sort direction on `updated_at`.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for notebook persistence.
///
/// Implementations live in notebook-infra (e.g., `SqliteNotebookRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait NotebookRepository: Send + Sync {
    /// Create a new notebook. Returns the created notebook.
    fn create(
        &self,
        notebook: &Notebook,
    ) -> impl std::future::Future<Output = Result<Notebook, RepositoryError>> + Send;

    /// Get a notebook by its unique ID. Absent is not an error here.
    fn get_by_id(
        &self,
        id: &NotebookId,
    ) -> impl std::future::Future<Output = Result<Option<Notebook>, RepositoryError>> + Send;

    /// List notebooks with optional filtering, sorting, and pagination.
    fn list(
        &self,
        filter: Option<NotebookFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Notebook>, RepositoryError>> + Send;

    /// Update an existing notebook. Returns the updated notebook.
    fn update(
        &self,
        notebook: &Notebook,
    ) -> impl std::future::Future<Output = Result<Notebook, RepositoryError>> + Send;

    /// Permanently delete a notebook by ID.
    ///
    /// Storage cascades the delete to the notebook's sessions and their
    /// messages in the same transaction.
    fn delete(
        &self,
        id: &NotebookId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Count all notebooks.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
