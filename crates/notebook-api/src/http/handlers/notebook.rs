//! Notebook CRUD handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use notebook_core::repository::SortOrder;
use notebook_core::repository::notebook::NotebookFilter;
use notebook_types::notebook::{CreateNotebookRequest, NotebookId, UpdateNotebookRequest};

use crate::http::error::AppError;
use crate::http::handlers::parse_uuid;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for notebook listing.
#[derive(Debug, Deserialize)]
pub struct NotebookListQuery {
    /// Filter by archived flag; omit to list both.
    pub archived: Option<bool>,
    /// Sort direction on updated_at ("asc" or "desc").
    #[serde(default = "default_order")]
    pub order: String,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn default_order() -> String {
    "desc".to_string()
}

fn resolve_notebook_id(s: &str) -> Result<NotebookId, AppError> {
    Ok(NotebookId::from_uuid(parse_uuid(s)?))
}

/// POST /api/v1/notebooks - Create a new notebook.
pub async fn create_notebook(
    State(state): State<AppState>,
    Json(body): Json<CreateNotebookRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let notebook = state.notebook_service.create_notebook(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let notebook_json = serde_json::to_value(&notebook).unwrap();
    let resp = ApiResponse::success(notebook_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/notebooks/{}", notebook.id))
        .with_link(
            "chat-sessions",
            &format!("/api/v1/notebooks/{}/chat-sessions", notebook.id),
        );

    Ok(Json(resp))
}

/// GET /api/v1/notebooks - List notebooks with filtering.
pub async fn list_notebooks(
    State(state): State<AppState>,
    Query(query): Query<NotebookListQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let sort_order = match query.order.to_lowercase().as_str() {
        "asc" => Some(SortOrder::Asc),
        _ => Some(SortOrder::Desc),
    };

    let filter = Some(NotebookFilter {
        archived: query.archived,
        sort_order,
        limit: query.limit,
        offset: query.offset,
    });

    let notebooks = state.notebook_service.list_notebooks(filter).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let notebooks_json: Vec<serde_json::Value> = notebooks
        .iter()
        .map(|n| serde_json::to_value(n).unwrap())
        .collect();

    let resp = ApiResponse::success(notebooks_json, request_id, elapsed)
        .with_link("self", "/api/v1/notebooks");

    Ok(Json(resp))
}

/// GET /api/v1/notebooks/{id} - Get a notebook by ID.
pub async fn get_notebook(
    State(state): State<AppState>,
    Path(notebook_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = resolve_notebook_id(&notebook_id)?;
    let notebook = state.notebook_service.get_notebook(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let notebook_json = serde_json::to_value(&notebook).unwrap();
    let resp = ApiResponse::success(notebook_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/notebooks/{}", notebook.id))
        .with_link(
            "chat-sessions",
            &format!("/api/v1/notebooks/{}/chat-sessions", notebook.id),
        );

    Ok(Json(resp))
}

/// PUT /api/v1/notebooks/{id} - Partially update a notebook.
pub async fn update_notebook(
    State(state): State<AppState>,
    Path(notebook_id): Path<String>,
    Json(body): Json<UpdateNotebookRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = resolve_notebook_id(&notebook_id)?;
    let updated = state.notebook_service.update_notebook(&id, body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let notebook_json = serde_json::to_value(&updated).unwrap();
    let resp = ApiResponse::success(notebook_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/notebooks/{}", updated.id));

    Ok(Json(resp))
}

/// DELETE /api/v1/notebooks/{id} - Delete a notebook and everything in it.
pub async fn delete_notebook(
    State(state): State<AppState>,
    Path(notebook_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = resolve_notebook_id(&notebook_id)?;
    state.notebook_service.delete_notebook(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "id": id.to_string()}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
