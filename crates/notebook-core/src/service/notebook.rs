//! Notebook management service.
//!
//! Orchestrates notebook creation, update, archival, and deletion.
//! Field validation lives here; the repository below only moves records.

use chrono::Utc;
use notebook_types::error::NotebookError;
use notebook_types::notebook::{
    CreateNotebookRequest, Notebook, NotebookId, UpdateNotebookRequest,
};
use tracing::info;

use crate::repository::notebook::{NotebookFilter, NotebookRepository};

/// Service orchestrating the notebook lifecycle.
pub struct NotebookService<N: NotebookRepository> {
    notebook_repo: N,
}

impl<N: NotebookRepository> NotebookService<N> {
    /// Create a new NotebookService.
    pub fn new(notebook_repo: N) -> Self {
        Self { notebook_repo }
    }

    /// Access the notebook repository.
    pub fn notebook_repo(&self) -> &N {
        &self.notebook_repo
    }

    /// Create a new notebook.
    ///
    /// The name must be non-empty after trimming; the description defaults
    /// to empty. Identifier and timestamps are assigned here, never by the
    /// caller.
    pub async fn create_notebook(
        &self,
        request: CreateNotebookRequest,
    ) -> Result<Notebook, NotebookError> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(NotebookError::InvalidName(
                "name cannot be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let notebook = Notebook {
            id: NotebookId::new(),
            name,
            description: request.description.unwrap_or_default(),
            archived: false,
            created_at: now,
            updated_at: now,
        };

        let notebook = self.notebook_repo.create(&notebook).await?;
        info!(notebook_id = %notebook.id, "Notebook created");
        Ok(notebook)
    }

    /// Get a notebook by ID, failing with `NotFound` if absent.
    pub async fn get_notebook(&self, id: &NotebookId) -> Result<Notebook, NotebookError> {
        self.notebook_repo
            .get_by_id(id)
            .await?
            .ok_or(NotebookError::NotFound)
    }

    /// List notebooks with optional filtering.
    pub async fn list_notebooks(
        &self,
        filter: Option<NotebookFilter>,
    ) -> Result<Vec<Notebook>, NotebookError> {
        Ok(self.notebook_repo.list(filter).await?)
    }

    /// Apply a partial update: only fields present in the request change.
    ///
    /// `updated_at` is bumped on every successful update, keeping the
    /// timestamp pair monotonic non-decreasing.
    pub async fn update_notebook(
        &self,
        id: &NotebookId,
        request: UpdateNotebookRequest,
    ) -> Result<Notebook, NotebookError> {
        let mut notebook = self.get_notebook(id).await?;

        if let Some(name) = request.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(NotebookError::InvalidName(
                    "name cannot be empty".to_string(),
                ));
            }
            notebook.name = name;
        }
        if let Some(description) = request.description {
            notebook.description = description;
        }
        if let Some(archived) = request.archived {
            notebook.archived = archived;
        }
        notebook.updated_at = Utc::now();

        Ok(self.notebook_repo.update(&notebook).await?)
    }

    /// Permanently delete a notebook.
    ///
    /// Storage cascades the delete to the notebook's sessions and their
    /// messages; nothing is left dangling on partial failure because the
    /// cascade runs inside one transaction.
    pub async fn delete_notebook(&self, id: &NotebookId) -> Result<(), NotebookError> {
        self.notebook_repo.delete(id).await?;
        info!(notebook_id = %id, "Notebook deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Behavior is exercised against the real SQLite repository in
    // notebook-infra; here we only pin the generic surface.
    fn _assert_notebook_service_generic<N: NotebookRepository>(_s: &NotebookService<N>) {}
}
