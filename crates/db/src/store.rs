//! The persistence interface shared by the validation layer and the entity
//! services.
//!
//! Production runs on [`SqliteStore`](crate::SqliteStore); tests can swap in
//! [`MemoryStore`](crate::memory::MemoryStore). Both honour the same
//! contract:
//!
//! - projects and users list in creation order, messages newest first;
//! - `delete_project` removes the project's messages, then its users, then
//!   the project, as one unit; `delete_user` removes the user's messages then
//!   the user;
//! - the unique indexes on project name key and `(project_id, email)` report
//!   [`StoreError::Duplicate`](crate::error::StoreError::Duplicate).

use async_trait::async_trait;
use mailstub_core::types::{EntityId, Timestamp};

use crate::error::StoreResult;
use crate::models::message::Message;
use crate::models::project::Project;
use crate::models::user::User;

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe.
    async fn ping(&self) -> StoreResult<()>;

    // --- projects ---

    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    async fn find_project(&self, id: &str) -> StoreResult<Option<Project>>;

    /// Find a project whose normalized name equals `name_key`, skipping
    /// `exclude_id` (the project being renamed).
    async fn find_project_by_name(
        &self,
        name_key: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<Project>>;

    async fn insert_project(&self, project: &Project) -> StoreResult<()>;

    /// Returns `None` if the project no longer exists.
    async fn update_project_name(
        &self,
        id: &str,
        name: &str,
        updated_at: Timestamp,
    ) -> StoreResult<Option<Project>>;

    /// Cascading delete. Returns `false` if the project did not exist.
    async fn delete_project(&self, id: &str) -> StoreResult<bool>;

    // --- users ---

    async fn list_users(&self, project_id: &str) -> StoreResult<Vec<User>>;

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>>;

    /// Find the user in `project_id` whose (normalized) email is `email`,
    /// skipping `exclude_id`.
    async fn find_user_by_email(
        &self,
        project_id: &str,
        email: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<User>>;

    async fn insert_user(&self, user: &User) -> StoreResult<()>;

    async fn update_user_email(
        &self,
        id: &str,
        email: &str,
        updated_at: Timestamp,
    ) -> StoreResult<Option<User>>;

    /// Cascading delete. Returns `false` if the user did not exist.
    async fn delete_user(&self, id: &str) -> StoreResult<bool>;

    // --- messages ---

    async fn list_messages(&self, user_id: &str) -> StoreResult<Vec<Message>>;

    async fn find_message(&self, id: &str) -> StoreResult<Option<Message>>;

    /// How many of `ids` (assumed distinct) exist.
    async fn count_messages(&self, ids: &[EntityId]) -> StoreResult<usize>;

    async fn insert_message(&self, message: &Message) -> StoreResult<()>;

    async fn update_message_read(
        &self,
        id: &str,
        read: bool,
        updated_at: Timestamp,
    ) -> StoreResult<Option<Message>>;

    async fn delete_message(&self, id: &str) -> StoreResult<bool>;

    /// Delete every message in `ids` in one transaction, returning how many
    /// rows went away.
    async fn delete_messages(&self, ids: &[EntityId]) -> StoreResult<u64>;
}
