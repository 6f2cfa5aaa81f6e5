//! Entity services against writes that race past validation.
//!
//! Each test validates a request, lets the store change underneath it, then
//! runs the service. The caller must see the same field error validation
//! would have reported, never a 500.

mod common;

use assert_matches::assert_matches;
use mailstub_api::error::AppError;
use mailstub_api::services::message::MessageService;
use mailstub_api::services::project::ProjectService;
use mailstub_api::services::user::UserService;
use mailstub_api::validation::message::{self as message_rules, NewMessage, UpdateMessagePayload};
use mailstub_api::validation::project::{self as project_rules, NewProject, ProjectPayload};
use mailstub_api::validation::user::{self as user_rules, NewUser, UpdateUserPayload};
use mailstub_core::error::CoreError;
use mailstub_core::validation::FieldErrors;
use mailstub_db::models::message::Message;
use mailstub_db::models::project::Project;
use mailstub_db::models::user::User;
use mailstub_db::Store;
use serde_json::json;

fn field_errors(err: AppError) -> FieldErrors {
    assert_matches!(err, AppError::Core(CoreError::Validation(errors)) => errors)
}

async fn project(store: &dyn Store, name: &str) -> Project {
    ProjectService::create(store, NewProject { name: name.into() })
        .await
        .unwrap()
}

async fn user(store: &dyn Store, project: &Project, email: &str) -> User {
    UserService::create(
        store,
        NewUser {
            project_id: project.id.clone(),
            email: email.into(),
        },
    )
    .await
    .unwrap()
}

async fn message(store: &dyn Store, user: &User) -> Message {
    MessageService::create(
        store,
        NewMessage {
            project_id: user.project_id.clone(),
            user_id: user.id.clone(),
            sender: "a@b.com".into(),
            receiver: user.email.clone(),
            subject: "Hi".into(),
            body: "x".into(),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Unique-index violations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_project_create_reports_name_taken() {
    let store = common::sqlite_store().await;
    let payload = ProjectPayload {
        name: Some(json!("Acme")),
    };

    // Both requests pass validation before either writes.
    let first = project_rules::check_create(store.as_ref(), &payload).await.unwrap();
    let second = project_rules::check_create(store.as_ref(), &payload).await.unwrap();

    ProjectService::create(store.as_ref(), first).await.unwrap();
    let errors = field_errors(ProjectService::create(store.as_ref(), second).await.unwrap_err());
    assert_eq!(errors.get("name"), Some("A project with this name already exists"));
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn racing_rename_reports_name_taken() {
    let store = common::sqlite_store().await;
    let globex = project(store.as_ref(), "Globex").await;

    let rename = project_rules::check_update(
        store.as_ref(),
        &globex.id,
        &ProjectPayload {
            name: Some(json!("Acme")),
        },
    )
    .await
    .unwrap();
    project(store.as_ref(), " acme ").await;

    let errors = field_errors(ProjectService::rename(store.as_ref(), rename).await.unwrap_err());
    assert_eq!(errors.get("name"), Some("A project with this name already exists"));
}

#[tokio::test]
async fn concurrent_user_create_reports_email_taken() {
    let store = common::sqlite_store().await;
    let acme = project(store.as_ref(), "Acme").await;
    let input = NewUser {
        project_id: acme.id.clone(),
        email: "dev@example.com".into(),
    };

    UserService::create(store.as_ref(), input.clone()).await.unwrap();
    let errors = field_errors(UserService::create(store.as_ref(), input).await.unwrap_err());
    assert_eq!(
        errors.get("email"),
        Some("A user with this email already exists in this project")
    );
}

#[tokio::test]
async fn racing_email_change_reports_email_taken() {
    let store = common::sqlite_store().await;
    let acme = project(store.as_ref(), "Acme").await;
    let me = user(store.as_ref(), &acme, "me@example.com").await;

    let change = user_rules::check_update(
        store.as_ref(),
        &me.id,
        &UpdateUserPayload {
            email: Some(json!("taken@example.com")),
        },
    )
    .await
    .unwrap();
    user(store.as_ref(), &acme, "taken@example.com").await;

    let errors = field_errors(UserService::change_email(store.as_ref(), change).await.unwrap_err());
    assert_eq!(
        errors.get("email"),
        Some("A user with this email already exists in this project")
    );
}

// ---------------------------------------------------------------------------
// Targets deleted after validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rename_of_deleted_project_reports_not_found() {
    let store = common::sqlite_store().await;
    let acme = project(store.as_ref(), "Acme").await;

    let rename = project_rules::check_update(
        store.as_ref(),
        &acme.id,
        &ProjectPayload {
            name: Some(json!("Renamed")),
        },
    )
    .await
    .unwrap();
    assert!(store.delete_project(&acme.id).await.unwrap());

    let errors = field_errors(ProjectService::rename(store.as_ref(), rename).await.unwrap_err());
    assert_eq!(errors.get("id"), Some("Project not found"));
}

#[tokio::test]
async fn delete_of_deleted_project_reports_not_found() {
    let store = common::sqlite_store().await;
    let acme = project(store.as_ref(), "Acme").await;

    let checked = project_rules::check_delete(store.as_ref(), &acme.id).await.unwrap();
    assert!(store.delete_project(&acme.id).await.unwrap());

    let errors = field_errors(ProjectService::delete(store.as_ref(), &checked).await.unwrap_err());
    assert_eq!(errors.get("id"), Some("Project not found"));
}

#[tokio::test]
async fn email_change_of_deleted_user_reports_not_found() {
    let store = common::sqlite_store().await;
    let acme = project(store.as_ref(), "Acme").await;
    let me = user(store.as_ref(), &acme, "me@example.com").await;

    let change = user_rules::check_update(
        store.as_ref(),
        &me.id,
        &UpdateUserPayload {
            email: Some(json!("new@example.com")),
        },
    )
    .await
    .unwrap();
    assert!(store.delete_user(&me.id).await.unwrap());

    let errors = field_errors(UserService::change_email(store.as_ref(), change).await.unwrap_err());
    assert_eq!(errors.get("id"), Some("User not found"));
}

#[tokio::test]
async fn set_read_on_deleted_message_reports_not_found() {
    let store = common::sqlite_store().await;
    let acme = project(store.as_ref(), "Acme").await;
    let me = user(store.as_ref(), &acme, "me@example.com").await;
    let mail = message(store.as_ref(), &me).await;

    let (checked, read) = message_rules::check_update(
        store.as_ref(),
        &mail.id,
        &UpdateMessagePayload {
            read: Some(json!(true)),
        },
    )
    .await
    .unwrap();
    assert!(store.delete_message(&mail.id).await.unwrap());

    let errors = field_errors(
        MessageService::set_read(store.as_ref(), &checked, read)
            .await
            .unwrap_err(),
    );
    assert_eq!(errors.get("id"), Some("Message not found"));
}

#[tokio::test]
async fn bulk_delete_after_every_id_vanished_reports_ids() {
    let store = common::sqlite_store().await;
    let acme = project(store.as_ref(), "Acme").await;
    let me = user(store.as_ref(), &acme, "me@example.com").await;
    let a = message(store.as_ref(), &me).await;
    let b = message(store.as_ref(), &me).await;

    let ids = message_rules::check_bulk_delete(
        store.as_ref(),
        &message_rules::BulkDeletePayload {
            ids: Some(json!([a.id, b.id])),
        },
    )
    .await
    .unwrap();
    assert_eq!(store.delete_messages(&ids).await.unwrap(), 2);

    let errors = field_errors(MessageService::delete_many(store.as_ref(), &ids).await.unwrap_err());
    assert_eq!(errors.get("ids"), Some("One or more messages not found"));
}

#[tokio::test]
async fn bulk_delete_reports_rows_actually_removed() {
    let store = common::sqlite_store().await;
    let acme = project(store.as_ref(), "Acme").await;
    let me = user(store.as_ref(), &acme, "me@example.com").await;
    let a = message(store.as_ref(), &me).await;
    let b = message(store.as_ref(), &me).await;

    let ids = vec![a.id.clone(), b.id.clone()];
    assert!(store.delete_message(&a.id).await.unwrap());

    let confirmation = MessageService::delete_many(store.as_ref(), &ids).await.unwrap();
    assert_eq!(confirmation, "1 message deleted successfully");
}
