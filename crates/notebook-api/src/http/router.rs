//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Notebook CRUD
        .route(
            "/notebooks",
            post(handlers::notebook::create_notebook).get(handlers::notebook::list_notebooks),
        )
        .route(
            "/notebooks/{id}",
            get(handlers::notebook::get_notebook)
                .put(handlers::notebook::update_notebook)
                .delete(handlers::notebook::delete_notebook),
        )
        // Sessions (notebook-scoped)
        .route(
            "/notebooks/{id}/chat-sessions",
            get(handlers::session::list_sessions).post(handlers::session::create_session),
        )
        // Sessions (top-level)
        .route(
            "/chat-sessions/{id}",
            get(handlers::session::get_session)
                .put(handlers::session::update_session)
                .delete(handlers::session::delete_session),
        )
        // Messages
        .route(
            "/chat-sessions/{id}/messages",
            post(handlers::message::add_message),
        )
        .route("/messages/{id}", delete(handlers::message::delete_message))
        // Dashboard stats
        .route("/stats", get(handlers::stats::get_stats));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
