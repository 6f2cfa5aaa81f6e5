//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::response::{ActionResponse, ProjectResponse, ProjectsResponse};
use crate::services::project::ProjectService;
use crate::state::AppState;
use crate::validation::project::{self as rules, ProjectPayload};

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ProjectPayload>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    let input = rules::check_create(state.store.as_ref(), &payload).await?;
    let project = ProjectService::create(state.store.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ProjectsResponse>> {
    let projects = ProjectService::list(state.store.as_ref()).await?;
    Ok(Json(ProjectsResponse { projects }))
}

/// PUT /api/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<ProjectPayload>,
) -> AppResult<Json<ProjectResponse>> {
    let input = rules::check_update(state.store.as_ref(), &id, &payload).await?;
    let project = ProjectService::rename(state.store.as_ref(), input).await?;
    Ok(Json(ProjectResponse { project }))
}

/// DELETE /api/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ActionResponse>> {
    let project = rules::check_delete(state.store.as_ref(), &id).await?;
    let message = ProjectService::delete(state.store.as_ref(), &project).await?;
    Ok(Json(ActionResponse { message }))
}
