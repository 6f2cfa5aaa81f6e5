//! Repository for the `projects` table.

use mailstub_core::ids::EntityKind;
use mailstub_core::normalize::normalize;
use mailstub_core::types::Timestamp;

use crate::error::{classify, StoreResult};
use crate::models::project::Project;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a fully-formed project row. `name_key` is derived from `name`.
    pub async fn create(pool: &DbPool, project: &Project) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO projects (id, name, name_key, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&project.id)
        .bind(&project.name)
        .bind(normalize(&project.name))
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(pool)
        .await
        .map_err(classify(EntityKind::Project))?;
        Ok(())
    }

    pub async fn find_by_id(pool: &DbPool, id: &str) -> StoreResult<Option<Project>> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?1");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(project)
    }

    /// Find a project by normalized name, optionally ignoring one id.
    pub async fn find_by_name_key(
        pool: &DbPool,
        name_key: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<Option<Project>> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE name_key = ?1 AND (?2 IS NULL OR id <> ?2)
             LIMIT 1"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(name_key)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await?;
        Ok(project)
    }

    /// List all projects in creation order.
    pub async fn list(pool: &DbPool) -> StoreResult<Vec<Project>> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY rowid");
        let projects = sqlx::query_as::<_, Project>(&query)
            .fetch_all(pool)
            .await?;
        Ok(projects)
    }

    /// Rename a project. Returns `None` if no row with the given `id` exists.
    pub async fn update_name(
        pool: &DbPool,
        id: &str,
        name: &str,
        updated_at: Timestamp,
    ) -> StoreResult<Option<Project>> {
        let query = format!(
            "UPDATE projects SET name = ?2, name_key = ?3, updated_at = ?4
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(name)
            .bind(normalize(name))
            .bind(updated_at)
            .fetch_optional(pool)
            .await
            .map_err(classify(EntityKind::Project))?;
        Ok(project)
    }

    /// Delete a project with its messages and users in one transaction.
    /// Returns `true` if the project row was removed.
    pub async fn delete_cascade(pool: &DbPool, id: &str) -> StoreResult<bool> {
        let mut tx = pool.begin().await?;

        let messages = sqlx::query("DELETE FROM messages WHERE project_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let users = sqlx::query("DELETE FROM users WHERE project_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let project = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(
            project_id = %id,
            messages = messages.rows_affected(),
            users = users.rows_affected(),
            "Cascaded project delete"
        );
        Ok(project.rows_affected() > 0)
    }
}
