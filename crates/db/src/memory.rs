//! In-memory [`Store`] for tests and throwaway sessions.
//!
//! Mirrors the SQLite store's ordering, cascade and unique-index behaviour so
//! validation and service code can be exercised without a database file.

use async_trait::async_trait;
use mailstub_core::ids::EntityKind;
use mailstub_core::normalize::normalize;
use mailstub_core::types::{EntityId, Timestamp};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::message::Message;
use crate::models::project::Project;
use crate::models::user::User;
use crate::store::Store;

#[derive(Debug, Default)]
struct Tables {
    projects: Vec<Project>,
    users: Vec<User>,
    messages: Vec<Message>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(projects: &[Project], name_key: &str, exclude_id: Option<&str>) -> bool {
    projects
        .iter()
        .any(|p| normalize(&p.name) == name_key && Some(p.id.as_str()) != exclude_id)
}

fn email_taken(users: &[User], project_id: &str, email: &str, exclude_id: Option<&str>) -> bool {
    users.iter().any(|u| {
        u.project_id == project_id && u.email == email && Some(u.id.as_str()) != exclude_id
    })
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.tables.read().await.projects.clone())
    }

    async fn find_project(&self, id: &str) -> StoreResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn find_project_by_name(
        &self,
        name_key: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<Project>> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .find(|p| normalize(&p.name) == name_key && Some(p.id.as_str()) != exclude_id)
            .cloned())
    }

    async fn insert_project(&self, project: &Project) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if name_taken(&tables.projects, &normalize(&project.name), None) {
            return Err(StoreError::Duplicate {
                entity: EntityKind::Project,
            });
        }
        tables.projects.push(project.clone());
        Ok(())
    }

    async fn update_project_name(
        &self,
        id: &str,
        name: &str,
        updated_at: Timestamp,
    ) -> StoreResult<Option<Project>> {
        let mut tables = self.tables.write().await;
        if name_taken(&tables.projects, &normalize(name), Some(id)) {
            return Err(StoreError::Duplicate {
                entity: EntityKind::Project,
            });
        }
        let Some(project) = tables.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        project.name = name.to_string();
        project.updated_at = updated_at;
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        tables.messages.retain(|m| m.project_id != id);
        tables.users.retain(|u| u.project_id != id);
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        Ok(tables.projects.len() < before)
    }

    async fn list_users(&self, project_id: &str) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| u.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(
        &self,
        project_id: &str,
        email: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| {
                u.project_id == project_id && u.email == email && Some(u.id.as_str()) != exclude_id
            })
            .cloned())
    }

    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if email_taken(&tables.users, &user.project_id, &user.email, None) {
            return Err(StoreError::Duplicate {
                entity: EntityKind::User,
            });
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update_user_email(
        &self,
        id: &str,
        email: &str,
        updated_at: Timestamp,
    ) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        let Some(project_id) = tables
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.project_id.clone())
        else {
            return Ok(None);
        };
        if email_taken(&tables.users, &project_id, email, Some(id)) {
            return Err(StoreError::Duplicate {
                entity: EntityKind::User,
            });
        }
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.email = email.to_string();
        user.updated_at = updated_at;
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        tables.messages.retain(|m| m.user_id != id);
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() < before)
    }

    async fn list_messages(&self, user_id: &str) -> StoreResult<Vec<Message>> {
        let tables = self.tables.read().await;
        Ok(tables
            .messages
            .iter()
            .rev()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_message(&self, id: &str) -> StoreResult<Option<Message>> {
        let tables = self.tables.read().await;
        Ok(tables.messages.iter().find(|m| m.id == id).cloned())
    }

    async fn count_messages(&self, ids: &[EntityId]) -> StoreResult<usize> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter(|id| tables.messages.iter().any(|m| &m.id == *id))
            .count())
    }

    async fn insert_message(&self, message: &Message) -> StoreResult<()> {
        self.tables.write().await.messages.push(message.clone());
        Ok(())
    }

    async fn update_message_read(
        &self,
        id: &str,
        read: bool,
        updated_at: Timestamp,
    ) -> StoreResult<Option<Message>> {
        let mut tables = self.tables.write().await;
        let Some(message) = tables.messages.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        message.read = read;
        message.updated_at = updated_at;
        Ok(Some(message.clone()))
    }

    async fn delete_message(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.messages.len();
        tables.messages.retain(|m| m.id != id);
        Ok(tables.messages.len() < before)
    }

    async fn delete_messages(&self, ids: &[EntityId]) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.messages.len();
        tables.messages.retain(|m| !ids.contains(&m.id));
        Ok((before - tables.messages.len()) as u64)
    }
}
