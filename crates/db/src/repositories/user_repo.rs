//! Repository for the `users` table.

use mailstub_core::ids::EntityKind;
use mailstub_core::types::Timestamp;

use crate::error::{classify, StoreResult};
use crate::models::user::User;
use crate::DbPool;

const COLUMNS: &str = "id, project_id, email, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user. `email` must already be normalized.
    pub async fn create(pool: &DbPool, user: &User) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO users (id, project_id, email, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&user.id)
        .bind(&user.project_id)
        .bind(&user.email)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(pool)
        .await
        .map_err(classify(EntityKind::User))?;
        Ok(())
    }

    pub async fn find_by_id(pool: &DbPool, id: &str) -> StoreResult<Option<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Find a user by normalized email within one project, optionally
    /// ignoring one id.
    pub async fn find_by_email(
        pool: &DbPool,
        project_id: &str,
        email: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<User>> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE project_id = ?1 AND email = ?2 AND (?3 IS NULL OR id <> ?3)
             LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(project_id)
            .bind(email)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// List a project's users in creation order.
    pub async fn list_by_project(pool: &DbPool, project_id: &str) -> StoreResult<Vec<User>> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE project_id = ?1 ORDER BY rowid");
        let users = sqlx::query_as::<_, User>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(users)
    }

    /// Change a user's email. Returns `None` if the user does not exist.
    pub async fn update_email(
        pool: &DbPool,
        id: &str,
        email: &str,
        updated_at: Timestamp,
    ) -> StoreResult<Option<User>> {
        let query = format!(
            "UPDATE users SET email = ?2, updated_at = ?3
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(email)
            .bind(updated_at)
            .fetch_optional(pool)
            .await
            .map_err(classify(EntityKind::User))?;
        Ok(user)
    }

    /// Delete a user and their messages in one transaction.
    pub async fn delete_cascade(pool: &DbPool, id: &str) -> StoreResult<bool> {
        let mut tx = pool.begin().await?;

        let messages = sqlx::query("DELETE FROM messages WHERE user_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let user = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            user_id = %id,
            messages = messages.rows_affected(),
            "Cascaded user delete"
        );
        Ok(user.rows_affected() > 0)
    }
}
