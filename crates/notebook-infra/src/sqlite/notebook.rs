//! SQLite notebook repository implementation.
//!
//! Implements `NotebookRepository` from `notebook-core` using sqlx with
//! split read/write pools: raw queries, private Row structs, reader for
//! SELECT, writer for mutation.

use chrono::{DateTime, Utc};
use notebook_core::repository::SortOrder;
use notebook_core::repository::notebook::{NotebookFilter, NotebookRepository};
use notebook_types::error::RepositoryError;
use notebook_types::notebook::{Notebook, NotebookId};
use sqlx::Row;
use uuid::Uuid;

use super::map_sqlx_err;
use super::pool::DatabasePool;

/// SQLite-backed implementation of `NotebookRepository`.
pub struct SqliteNotebookRepository {
    pool: DatabasePool,
}

impl SqliteNotebookRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Notebook.
struct NotebookRow {
    id: String,
    name: String,
    description: String,
    archived: i64,
    created_at: String,
    updated_at: String,
}

impl NotebookRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            archived: row.try_get("archived")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_notebook(self) -> Result<Notebook, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid notebook id: {e}")))?;

        Ok(Notebook {
            id: NotebookId::from_uuid(id),
            name: self.name,
            description: self.description,
            archived: self.archived != 0,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl NotebookRepository for SqliteNotebookRepository {
    async fn create(&self, notebook: &Notebook) -> Result<Notebook, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO notebooks (id, name, description, archived, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(notebook.id.to_string())
        .bind(&notebook.name)
        .bind(&notebook.description)
        .bind(notebook.archived as i64)
        .bind(format_datetime(&notebook.created_at))
        .bind(format_datetime(&notebook.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_err)?;

        Ok(notebook.clone())
    }

    async fn get_by_id(&self, id: &NotebookId) -> Result<Option<Notebook>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM notebooks WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        match row {
            Some(row) => {
                let notebook_row =
                    NotebookRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(notebook_row.into_notebook()?))
            }
            None => Ok(None),
        }
    }

    async fn list(
        &self,
        filter: Option<NotebookFilter>,
    ) -> Result<Vec<Notebook>, RepositoryError> {
        let filter = filter.unwrap_or_default();

        let mut sql = String::from("SELECT * FROM notebooks");
        if filter.archived.is_some() {
            sql.push_str(" WHERE archived = ?");
        }
        sql.push_str(" ORDER BY updated_at");
        match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => sql.push_str(" ASC"),
            SortOrder::Desc => sql.push_str(" DESC"),
        }
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = filter.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let mut query = sqlx::query(&sql);
        if let Some(archived) = filter.archived {
            query = query.bind(archived as i64);
        }

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        let mut notebooks = Vec::with_capacity(rows.len());
        for row in &rows {
            let notebook_row =
                NotebookRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            notebooks.push(notebook_row.into_notebook()?);
        }

        Ok(notebooks)
    }

    async fn update(&self, notebook: &Notebook) -> Result<Notebook, RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE notebooks
               SET name = ?, description = ?, archived = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&notebook.name)
        .bind(&notebook.description)
        .bind(notebook.archived as i64)
        .bind(format_datetime(&notebook.updated_at))
        .bind(notebook.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(notebook.clone())
    }

    async fn delete(&self, id: &NotebookId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM notebooks WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM notebooks")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_sqlx_err)?;

        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}
