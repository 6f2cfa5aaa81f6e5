pub mod health;
pub mod message;
pub mod project;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /projects                 list, create
/// /projects/{id}            rename, delete (cascades)
///
/// /users?projectId=         list (per project)
/// /users                    create
/// /users/{id}               change email, delete (cascades)
///
/// /messages?userId=         list (per mailbox, newest first)
/// /messages                 create, bulk delete
/// /messages/{id}            mark read/unread, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/users", user::router())
        .nest("/messages", message::router())
}
