//! [`Store`] backed by the SQLite repositories.

use async_trait::async_trait;
use mailstub_core::types::{EntityId, Timestamp};

use crate::error::StoreResult;
use crate::models::message::Message;
use crate::models::project::Project;
use crate::models::user::User;
use crate::repositories::{MessageRepo, ProjectRepo, UserRepo};
use crate::store::Store;
use crate::DbPool;

#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        ProjectRepo::list(&self.pool).await
    }

    async fn find_project(&self, id: &str) -> StoreResult<Option<Project>> {
        ProjectRepo::find_by_id(&self.pool, id).await
    }

    async fn find_project_by_name(
        &self,
        name_key: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<Project>> {
        ProjectRepo::find_by_name_key(&self.pool, name_key, exclude_id).await
    }

    async fn insert_project(&self, project: &Project) -> StoreResult<()> {
        ProjectRepo::create(&self.pool, project).await
    }

    async fn update_project_name(
        &self,
        id: &str,
        name: &str,
        updated_at: Timestamp,
    ) -> StoreResult<Option<Project>> {
        ProjectRepo::update_name(&self.pool, id, name, updated_at).await
    }

    async fn delete_project(&self, id: &str) -> StoreResult<bool> {
        ProjectRepo::delete_cascade(&self.pool, id).await
    }

    async fn list_users(&self, project_id: &str) -> StoreResult<Vec<User>> {
        UserRepo::list_by_project(&self.pool, project_id).await
    }

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        UserRepo::find_by_id(&self.pool, id).await
    }

    async fn find_user_by_email(
        &self,
        project_id: &str,
        email: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<User>> {
        UserRepo::find_by_email(&self.pool, project_id, email, exclude_id).await
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        UserRepo::create(&self.pool, user).await
    }

    async fn update_user_email(
        &self,
        id: &str,
        email: &str,
        updated_at: Timestamp,
    ) -> StoreResult<Option<User>> {
        UserRepo::update_email(&self.pool, id, email, updated_at).await
    }

    async fn delete_user(&self, id: &str) -> StoreResult<bool> {
        UserRepo::delete_cascade(&self.pool, id).await
    }

    async fn list_messages(&self, user_id: &str) -> StoreResult<Vec<Message>> {
        MessageRepo::list_by_user(&self.pool, user_id).await
    }

    async fn find_message(&self, id: &str) -> StoreResult<Option<Message>> {
        MessageRepo::find_by_id(&self.pool, id).await
    }

    async fn count_messages(&self, ids: &[EntityId]) -> StoreResult<usize> {
        MessageRepo::count_existing(&self.pool, ids).await
    }

    async fn insert_message(&self, message: &Message) -> StoreResult<()> {
        MessageRepo::create(&self.pool, message).await
    }

    async fn update_message_read(
        &self,
        id: &str,
        read: bool,
        updated_at: Timestamp,
    ) -> StoreResult<Option<Message>> {
        MessageRepo::set_read(&self.pool, id, read, updated_at).await
    }

    async fn delete_message(&self, id: &str) -> StoreResult<bool> {
        MessageRepo::delete(&self.pool, id).await
    }

    async fn delete_messages(&self, ids: &[EntityId]) -> StoreResult<u64> {
        MessageRepo::delete_many(&self.pool, ids).await
    }
}
