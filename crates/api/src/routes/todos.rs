//! Todo item endpoints.

use std::sync::Arc;

use application::{CreateTodoItemRequest, RenameTodoItemRequest, TodoItemDto};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::TodoItemId;

use super::parse_id;
use crate::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::ApiResponse;

/// GET /api/todos
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TodoItemDto>>>, ApiError> {
    let items = state.todos.list().await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/todos — create a new item.
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTodoItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TodoItemDto>>), ApiError> {
    let item = state.todos.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(item, "Todo item created successfully")),
    ))
}

/// GET /api/todos/{id}
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TodoItemDto>>, ApiError> {
    let id: TodoItemId = parse_id(&id)?;
    let item = state.todos.get(id).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// PUT /api/todos/{id}/complete
#[tracing::instrument(skip(state))]
pub async fn complete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<TodoItemDto>>, ApiError> {
    let id: TodoItemId = parse_id(&id)?;
    let item = state.todos.complete(id).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// PUT /api/todos/{id}/rename
#[tracing::instrument(skip(state))]
pub async fn rename(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<RenameTodoItemRequest>,
) -> Result<Json<ApiResponse<TodoItemDto>>, ApiError> {
    let id: TodoItemId = parse_id(&id)?;
    let item = state.todos.rename(id, req).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/todos/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: TodoItemId = parse_id(&id)?;
    state.todos.delete(id).await?;
    Ok(Json(ApiResponse::message("Todo item deleted successfully")))
}
