//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository traits, but AppState pins them to the
//! concrete SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use notebook_core::chat::service::ChatService;
use notebook_core::service::notebook::NotebookService;
use notebook_infra::config::{load_global_config, resolve_data_dir};
use notebook_infra::sqlite::chat::SqliteChatRepository;
use notebook_infra::sqlite::notebook::SqliteNotebookRepository;
use notebook_infra::sqlite::pool::DatabasePool;
use notebook_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteNotebookService = NotebookService<SqliteNotebookRepository>;

pub type ConcreteChatService = ChatService<SqliteChatRepository, SqliteNotebookRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub notebook_service: Arc<ConcreteNotebookService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("notebook.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        // Wire services to their repositories
        let notebook_service =
            NotebookService::new(SqliteNotebookRepository::new(db_pool.clone()));
        let chat_service = ChatService::new(
            SqliteChatRepository::new(db_pool.clone()),
            SqliteNotebookRepository::new(db_pool.clone()),
        );

        Ok(Self {
            notebook_service: Arc::new(notebook_service),
            chat_service: Arc::new(chat_service),
            config,
            data_dir,
            db_pool,
        })
    }
}
