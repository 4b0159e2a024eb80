//! User endpoints.

use std::sync::Arc;

use application::{CreateUserRequest, DeactivateUserRequest, UpdateUserRequest, UserDto};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use domain::UserId;
use serde::Deserialize;

use super::parse_id;
use crate::AppState;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub active_only: bool,
}

/// GET /api/users — list users, optionally only the active ones.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    let users = if query.active_only {
        state.users.active_users().await?
    } else {
        state.users.list().await?
    };
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /api/users — register a new user.
#[tracing::instrument(skip(state))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let user = state.users.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(user, "User created successfully")),
    ))
}

/// GET /api/users/{id} — load a user by id.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.users.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/users/by-email/{email} — load a user by email address.
#[tracing::instrument(skip(state))]
pub async fn get_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user = state.users.get_by_email(&email).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// PUT /api/users/{id} — change email and/or full name.
#[tracing::instrument(skip(state))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    let user = state.users.update(id, req).await?;
    Ok(Json(ApiResponse::ok_with_message(user, "User updated successfully")))
}

/// DELETE /api/users/{id}
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    state.users.delete(id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}

/// POST /api/users/{id}/deactivate
#[tracing::instrument(skip(state))]
pub async fn deactivate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<DeactivateUserRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    state.users.deactivate(id, req).await?;
    Ok(Json(ApiResponse::message("User deactivated successfully")))
}

/// POST /api/users/{id}/activate
#[tracing::instrument(skip(state))]
pub async fn activate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    state.users.activate(id).await?;
    Ok(Json(ApiResponse::message("User activated successfully")))
}

/// POST /api/users/{id}/login — record a login.
#[tracing::instrument(skip(state))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id: UserId = parse_id(&id)?;
    state.users.record_login(id).await?;
    Ok(Json(ApiResponse::message("Login recorded successfully")))
}
