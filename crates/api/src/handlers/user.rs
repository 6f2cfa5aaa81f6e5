//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{JsonBody, QueryParams};
use crate::query::UsersQuery;
use crate::response::{ActionResponse, UserResponse, UsersResponse};
use crate::services::user::UserService;
use crate::state::AppState;
use crate::validation::user::{self as rules, CreateUserPayload, UpdateUserPayload};

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserPayload>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let input = rules::check_create(state.store.as_ref(), &payload).await?;
    let user = UserService::create(state.store.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// GET /api/users?projectId=
pub async fn list_by_project(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UsersQuery>,
) -> AppResult<Json<UsersResponse>> {
    let project = rules::check_list(state.store.as_ref(), &query).await?;
    let users = UserService::list(state.store.as_ref(), &project).await?;
    Ok(Json(UsersResponse { users }))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUserPayload>,
) -> AppResult<Json<UserResponse>> {
    let input = rules::check_update(state.store.as_ref(), &id, &payload).await?;
    let user = UserService::change_email(state.store.as_ref(), input).await?;
    Ok(Json(UserResponse { user }))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ActionResponse>> {
    let user = rules::check_delete(state.store.as_ref(), &id).await?;
    let message = UserService::delete(state.store.as_ref(), &user).await?;
    Ok(Json(ActionResponse { message }))
}
