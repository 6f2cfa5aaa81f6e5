//! Rules for user (mailbox) requests.

use mailstub_core::messages::{EMAIL_INVALID, EMAIL_REQUIRED, USER_EMAIL_TAKEN, USER_NOT_FOUND};
use mailstub_core::normalize::normalize;
use mailstub_core::validation::FieldErrors;
use mailstub_db::models::project::Project;
use mailstub_db::models::user::User;
use mailstub_db::Store;
use serde::Deserialize;
use serde_json::Value;

use super::fields::{self, EMAIL, ID, PROJECT_ID};
use super::project::referenced_project;
use crate::error::AppResult;
use crate::query::UsersQuery;

/// Body of `POST /users`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    pub project_id: Option<Value>,
    pub email: Option<Value>,
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserPayload {
    pub email: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub project_id: String,
    /// Normalized (trimmed, lowercase).
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct UserEmailChange {
    pub user: User,
    /// Normalized (trimmed, lowercase).
    pub email: String,
}

/// Validate and normalize the `email` field.
fn checked_email(value: &Option<Value>, errors: &mut FieldErrors) -> Option<String> {
    fields::required_email(value, EMAIL, EMAIL_REQUIRED, EMAIL_INVALID, errors).map(normalize)
}

pub async fn check_create(store: &dyn Store, payload: &CreateUserPayload) -> AppResult<NewUser> {
    let mut errors = FieldErrors::new();

    let project = referenced_project(
        store,
        fields::text(&payload.project_id),
        PROJECT_ID,
        &mut errors,
    )
    .await?;

    let email = checked_email(&payload.email, &mut errors);

    if let (Some(project), Some(email)) = (&project, &email) {
        if store
            .find_user_by_email(&project.id, email, None)
            .await?
            .is_some()
        {
            errors.add(EMAIL, USER_EMAIL_TAKEN);
        }
    }

    match (project, email) {
        (Some(project), Some(email)) if errors.is_empty() => Ok(NewUser {
            project_id: project.id,
            email,
        }),
        _ => Err(errors.into()),
    }
}

pub async fn check_update(
    store: &dyn Store,
    id: &str,
    payload: &UpdateUserPayload,
) -> AppResult<UserEmailChange> {
    let mut errors = FieldErrors::new();

    let user = store.find_user(id).await?;
    if user.is_none() {
        errors.add(ID, USER_NOT_FOUND);
    }

    let email = checked_email(&payload.email, &mut errors);

    // Uniqueness is scoped to the project the user already belongs to.
    if let (Some(user), Some(email)) = (&user, &email) {
        if store
            .find_user_by_email(&user.project_id, email, Some(&user.id))
            .await?
            .is_some()
        {
            errors.add(EMAIL, USER_EMAIL_TAKEN);
        }
    }

    match (user, email) {
        (Some(user), Some(email)) if errors.is_empty() => Ok(UserEmailChange { user, email }),
        _ => Err(errors.into()),
    }
}

pub async fn check_delete(store: &dyn Store, id: &str) -> AppResult<User> {
    match store.find_user(id).await? {
        Some(user) => Ok(user),
        None => Err(FieldErrors::single(ID, USER_NOT_FOUND).into()),
    }
}

/// `GET /users?projectId=` must name an existing project.
pub async fn check_list(store: &dyn Store, query: &UsersQuery) -> AppResult<Project> {
    let mut errors = FieldErrors::new();
    let project = referenced_project(
        store,
        fields::query_text(&query.project_id),
        PROJECT_ID,
        &mut errors,
    )
    .await?;

    match project {
        Some(project) if errors.is_empty() => Ok(project),
        _ => Err(errors.into()),
    }
}
