//! Rules for message requests.

use std::collections::HashSet;

use mailstub_core::messages::{
    BODY_REQUIRED, IDS_EMPTY, IDS_UNKNOWN, MESSAGE_NOT_FOUND, READ_NOT_BOOLEAN, RECEIVER_INVALID,
    RECEIVER_REQUIRED, RECEIVER_UNKNOWN, SENDER_INVALID, SENDER_REQUIRED, SUBJECT_REQUIRED,
    USER_ID_REQUIRED, USER_NOT_FOUND,
};
use mailstub_core::ids::EntityKind;
use mailstub_core::normalize::normalize;
use mailstub_core::types::EntityId;
use mailstub_core::validation::FieldErrors;
use mailstub_db::models::message::Message;
use mailstub_db::models::user::User;
use mailstub_db::Store;
use serde::Deserialize;
use serde_json::Value;

use super::fields::{
    self, BODY, ID, IDS, PROJECT_ID, READ, RECEIVER, SENDER, SUBJECT, USER_ID,
};
use super::project::referenced_project;
use crate::error::AppResult;
use crate::query::MessagesQuery;

/// Body of `POST /messages`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessagePayload {
    pub project_id: Option<Value>,
    pub sender: Option<Value>,
    pub receiver: Option<Value>,
    pub subject: Option<Value>,
    pub body: Option<Value>,
}

/// Body of `PATCH /messages/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMessagePayload {
    pub read: Option<Value>,
}

/// Body of `DELETE /messages`.
#[derive(Debug, Default, Deserialize)]
pub struct BulkDeletePayload {
    pub ids: Option<Value>,
}

/// A message ready to be stored, addressed to a resolved mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub project_id: EntityId,
    pub user_id: EntityId,
    pub sender: String,
    /// Normalized, equal to the owning user's email at creation time.
    pub receiver: String,
    pub subject: String,
    pub body: String,
}

pub async fn check_create(
    store: &dyn Store,
    payload: &CreateMessagePayload,
) -> AppResult<NewMessage> {
    let mut errors = FieldErrors::new();

    let project = referenced_project(
        store,
        fields::text(&payload.project_id),
        PROJECT_ID,
        &mut errors,
    )
    .await?;

    let sender = fields::required_email(
        &payload.sender,
        SENDER,
        SENDER_REQUIRED,
        SENDER_INVALID,
        &mut errors,
    );
    let receiver = fields::required_email(
        &payload.receiver,
        RECEIVER,
        RECEIVER_REQUIRED,
        RECEIVER_INVALID,
        &mut errors,
    )
    .map(normalize);

    // Mailbox lookup only makes sense once both the project and the address
    // are usable.
    let mut user = None;
    if let (Some(project), Some(receiver)) = (&project, &receiver) {
        user = store.find_user_by_email(&project.id, receiver, None).await?;
        if user.is_none() {
            errors.add(RECEIVER, RECEIVER_UNKNOWN);
        }
    }

    let subject = fields::required(&payload.subject, SUBJECT, SUBJECT_REQUIRED, &mut errors);

    let body = fields::raw_text(&payload.body);
    if body.is_none() {
        errors.add(BODY, BODY_REQUIRED);
    }

    match (user, sender, receiver, subject, body) {
        (Some(user), Some(sender), Some(receiver), Some(subject), Some(body))
            if errors.is_empty() =>
        {
            Ok(NewMessage {
                project_id: user.project_id,
                user_id: user.id,
                sender: sender.to_string(),
                receiver,
                subject: subject.to_string(),
                body: body.to_string(),
            })
        }
        _ => Err(errors.into()),
    }
}

/// Returns the message and the requested `read` state.
pub async fn check_update(
    store: &dyn Store,
    id: &str,
    payload: &UpdateMessagePayload,
) -> AppResult<(Message, bool)> {
    let mut errors = FieldErrors::new();

    let message = store.find_message(id).await?;
    if message.is_none() {
        errors.add(ID, MESSAGE_NOT_FOUND);
    }

    let read = payload.read.as_ref().and_then(Value::as_bool);
    if read.is_none() {
        errors.add(READ, READ_NOT_BOOLEAN);
    }

    match (message, read) {
        (Some(message), Some(read)) if errors.is_empty() => Ok((message, read)),
        _ => Err(errors.into()),
    }
}

pub async fn check_delete(store: &dyn Store, id: &str) -> AppResult<Message> {
    match store.find_message(id).await? {
        Some(message) => Ok(message),
        None => Err(FieldErrors::single(ID, MESSAGE_NOT_FOUND).into()),
    }
}

/// Returns the distinct ids to delete, in request order. Every one of them
/// exists, or nothing is returned.
pub async fn check_bulk_delete(
    store: &dyn Store,
    payload: &BulkDeletePayload,
) -> AppResult<Vec<EntityId>> {
    let items = match payload.ids.as_ref().and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items,
        _ => return Err(FieldErrors::single(IDS, IDS_EMPTY).into()),
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut ids: Vec<EntityId> = Vec::with_capacity(items.len());
    for item in items {
        // Neither a non-string nor a foreign-kind id can name a message.
        let Some(id) = item.as_str().filter(|id| fields::is_id_of(EntityKind::Message, id))
        else {
            return Err(FieldErrors::single(IDS, IDS_UNKNOWN).into());
        };
        if seen.insert(id) {
            ids.push(id.to_string());
        }
    }

    if store.count_messages(&ids).await? != ids.len() {
        return Err(FieldErrors::single(IDS, IDS_UNKNOWN).into());
    }
    Ok(ids)
}

/// `GET /messages?userId=` must name an existing user.
pub async fn check_list(store: &dyn Store, query: &MessagesQuery) -> AppResult<User> {
    let Some(user_id) = fields::query_text(&query.user_id) else {
        return Err(FieldErrors::single(USER_ID, USER_ID_REQUIRED).into());
    };

    let user = if fields::is_id_of(EntityKind::User, user_id) {
        store.find_user(user_id).await?
    } else {
        None
    };

    match user {
        Some(user) => Ok(user),
        None => Err(FieldErrors::single(USER_ID, USER_NOT_FOUND).into()),
    }
}
