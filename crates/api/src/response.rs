//! Response envelope types for API handlers.
//!
//! Every entity response is wrapped in a single key named after the entity
//! (`{ "project": … }`, `{ "users": […] }`). Action confirmations use
//! `{ "message": "<text>" }`.

use mailstub_db::models::message::Message;
use mailstub_db::models::project::Project;
use mailstub_db::models::user::User;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: Message,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

/// Human-readable confirmation, e.g. `{ "message": "User deleted successfully" }`.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub message: String,
}
