#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use mailstub_core::types::{EntityId, Timestamp};
use mailstub_db::models::message::Message;
use mailstub_db::models::project::Project;
use mailstub_db::models::user::User;
use mailstub_db::{SqliteStore, Store, StoreError, StoreResult};
use tower::ServiceExt;

use mailstub_api::config::{LogFormat, ServerConfig};
use mailstub_api::router::build_app_router;
use mailstub_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and no static directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_path: ":memory:".into(),
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        static_dir: None,
        log_format: LogFormat::Text,
    }
}

/// A migrated SQLite store living in memory.
pub async fn sqlite_store() -> Arc<dyn Store> {
    let pool = mailstub_db::create_memory_pool().await.unwrap();
    mailstub_db::run_migrations(&pool).await.unwrap();
    Arc::new(SqliteStore::new(pool))
}

/// The production router (same middleware stack) over `store`.
pub fn build_test_app_with(store: Arc<dyn Store>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn build_test_app(store: Arc<dyn Store>) -> Router {
    build_test_app_with(store, test_config())
}

/// Router over a fresh migrated SQLite store.
pub async fn app() -> Router {
    build_test_app(sqlite_store().await)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn delete_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::DELETE, uri, Some(body)).await
}

/// POST raw bytes as JSON, for malformed-body tests.
pub async fn post_raw(app: &Router, uri: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a project and return its JSON.
pub async fn create_project(app: &Router, name: &str) -> serde_json::Value {
    let response = post_json(app, "/api/projects", serde_json::json!({ "name": name })).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["project"].clone()
}

/// Create a user and return its JSON.
pub async fn create_user(app: &Router, project_id: &str, email: &str) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/users",
        serde_json::json!({ "projectId": project_id, "email": email }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["user"].clone()
}

/// Deliver a message to `receiver` and return its JSON.
pub async fn create_message(
    app: &Router,
    project_id: &str,
    receiver: &str,
    subject: &str,
) -> serde_json::Value {
    let response = post_json(
        app,
        "/api/messages",
        serde_json::json!({
            "projectId": project_id,
            "sender": "noreply@app.test",
            "receiver": receiver,
            "subject": subject,
            "body": "<p>Hello</p>",
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["message"].clone()
}

// ---------------------------------------------------------------------------
// Broken stores
// ---------------------------------------------------------------------------

fn closed<T>() -> StoreResult<T> {
    Err(StoreError::Database(sqlx::Error::PoolClosed))
}

/// Every call fails as if the database had gone away.
pub struct FailingStore;

/// Every call panics.
pub struct PanickingStore;

macro_rules! impl_store {
    ($ty:ty, $fail:expr) => {
        #[async_trait]
        impl Store for $ty {
            async fn ping(&self) -> StoreResult<()> {
                $fail
            }
            async fn list_projects(&self) -> StoreResult<Vec<Project>> {
                $fail
            }
            async fn find_project(&self, _: &str) -> StoreResult<Option<Project>> {
                $fail
            }
            async fn find_project_by_name(
                &self,
                _: &str,
                _: Option<&str>,
            ) -> StoreResult<Option<Project>> {
                $fail
            }
            async fn insert_project(&self, _: &Project) -> StoreResult<()> {
                $fail
            }
            async fn update_project_name(
                &self,
                _: &str,
                _: &str,
                _: Timestamp,
            ) -> StoreResult<Option<Project>> {
                $fail
            }
            async fn delete_project(&self, _: &str) -> StoreResult<bool> {
                $fail
            }
            async fn list_users(&self, _: &str) -> StoreResult<Vec<User>> {
                $fail
            }
            async fn find_user(&self, _: &str) -> StoreResult<Option<User>> {
                $fail
            }
            async fn find_user_by_email(
                &self,
                _: &str,
                _: &str,
                _: Option<&str>,
            ) -> StoreResult<Option<User>> {
                $fail
            }
            async fn insert_user(&self, _: &User) -> StoreResult<()> {
                $fail
            }
            async fn update_user_email(
                &self,
                _: &str,
                _: &str,
                _: Timestamp,
            ) -> StoreResult<Option<User>> {
                $fail
            }
            async fn delete_user(&self, _: &str) -> StoreResult<bool> {
                $fail
            }
            async fn list_messages(&self, _: &str) -> StoreResult<Vec<Message>> {
                $fail
            }
            async fn find_message(&self, _: &str) -> StoreResult<Option<Message>> {
                $fail
            }
            async fn count_messages(&self, _: &[EntityId]) -> StoreResult<usize> {
                $fail
            }
            async fn insert_message(&self, _: &Message) -> StoreResult<()> {
                $fail
            }
            async fn update_message_read(
                &self,
                _: &str,
                _: bool,
                _: Timestamp,
            ) -> StoreResult<Option<Message>> {
                $fail
            }
            async fn delete_message(&self, _: &str) -> StoreResult<bool> {
                $fail
            }
            async fn delete_messages(&self, _: &[EntityId]) -> StoreResult<u64> {
                $fail
            }
        }
    };
}

impl_store!(FailingStore, closed());
impl_store!(PanickingStore, panic!("store exploded"));
