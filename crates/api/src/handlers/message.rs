//! Handlers for the `/messages` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::extract::{JsonBody, QueryParams};
use crate::query::MessagesQuery;
use crate::response::{ActionResponse, MessageResponse, MessagesResponse};
use crate::services::message::MessageService;
use crate::state::AppState;
use crate::validation::message::{
    self as rules, BulkDeletePayload, CreateMessagePayload, UpdateMessagePayload,
};

/// POST /api/messages
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateMessagePayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let input = rules::check_create(state.store.as_ref(), &payload).await?;
    let message = MessageService::create(state.store.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse { message })))
}

/// GET /api/messages?userId=
pub async fn list_by_user(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<MessagesQuery>,
) -> AppResult<Json<MessagesResponse>> {
    let user = rules::check_list(state.store.as_ref(), &query).await?;
    let messages = MessageService::list(state.store.as_ref(), &user).await?;
    Ok(Json(MessagesResponse { messages }))
}

/// PATCH /api/messages/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateMessagePayload>,
) -> AppResult<Json<MessageResponse>> {
    let (message, read) = rules::check_update(state.store.as_ref(), &id, &payload).await?;
    let message = MessageService::set_read(state.store.as_ref(), &message, read).await?;
    Ok(Json(MessageResponse { message }))
}

/// DELETE /api/messages/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ActionResponse>> {
    let message = rules::check_delete(state.store.as_ref(), &id).await?;
    let message = MessageService::delete(state.store.as_ref(), &message).await?;
    Ok(Json(ActionResponse { message }))
}

/// DELETE /api/messages
pub async fn delete_many(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<BulkDeletePayload>,
) -> AppResult<Json<ActionResponse>> {
    let ids = rules::check_bulk_delete(state.store.as_ref(), &payload).await?;
    let message = MessageService::delete_many(state.store.as_ref(), &ids).await?;
    Ok(Json(ActionResponse { message }))
}
