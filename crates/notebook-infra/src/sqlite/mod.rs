//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod chat;
pub mod notebook;
pub mod pool;

use notebook_types::error::RepositoryError;

/// Map a sqlx error into the repository taxonomy.
///
/// Pool and transport failures become `Connection` so the access layer can
/// surface them as "storage unavailable" instead of a generic fault.
pub(crate) fn map_sqlx_err(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Connection
        }
        other => RepositoryError::Query(other.to_string()),
    }
}
