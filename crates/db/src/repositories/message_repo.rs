//! Repository for the `messages` table.

use mailstub_core::types::{EntityId, Timestamp};
use sqlx::{QueryBuilder, Sqlite};

use crate::error::StoreResult;
use crate::models::message::Message;
use crate::DbPool;

/// Ids bound per `IN (...)` list, well under SQLite's bind-variable limit.
pub const ID_CHUNK: usize = 500;

const COLUMNS: &str =
    "id, project_id, user_id, sender, receiver, subject, body, read, created_at, updated_at";

/// Provides CRUD operations for messages.
pub struct MessageRepo;

impl MessageRepo {
    pub async fn create(pool: &DbPool, message: &Message) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO messages
                (id, project_id, user_id, sender, receiver, subject, body, read, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&message.id)
        .bind(&message.project_id)
        .bind(&message.user_id)
        .bind(&message.sender)
        .bind(&message.receiver)
        .bind(&message.subject)
        .bind(&message.body)
        .bind(message.read)
        .bind(message.created_at)
        .bind(message.updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &DbPool, id: &str) -> StoreResult<Option<Message>> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = ?1");
        let message = sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(message)
    }

    /// A user's mailbox, newest first.
    pub async fn list_by_user(pool: &DbPool, user_id: &str) -> StoreResult<Vec<Message>> {
        let query =
            format!("SELECT {COLUMNS} FROM messages WHERE user_id = ?1 ORDER BY rowid DESC");
        let messages = sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(messages)
    }

    /// Count how many of `ids` exist.
    pub async fn count_existing(pool: &DbPool, ids: &[EntityId]) -> StoreResult<usize> {
        let mut total = 0;
        for chunk in ids.chunks(ID_CHUNK) {
            let mut builder =
                QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM messages WHERE id IN (");
            push_ids(&mut builder, chunk);

            let count = builder
                .build_query_scalar::<i64>()
                .fetch_one(pool)
                .await?;
            total += usize::try_from(count).unwrap_or_default();
        }
        Ok(total)
    }

    pub async fn set_read(
        pool: &DbPool,
        id: &str,
        read: bool,
        updated_at: Timestamp,
    ) -> StoreResult<Option<Message>> {
        let query = format!(
            "UPDATE messages SET read = ?2, updated_at = ?3
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let message = sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .bind(read)
            .bind(updated_at)
            .fetch_optional(pool)
            .await?;
        Ok(message)
    }

    pub async fn delete(pool: &DbPool, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every listed message in one transaction.
    pub async fn delete_many(pool: &DbPool, ids: &[EntityId]) -> StoreResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut removed = 0;
        for chunk in ids.chunks(ID_CHUNK) {
            let mut builder = QueryBuilder::<Sqlite>::new("DELETE FROM messages WHERE id IN (");
            push_ids(&mut builder, chunk);
            removed += builder.build().execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        tracing::debug!(requested = ids.len(), removed, "Bulk message delete committed");
        Ok(removed)
    }
}

/// Append `?, ?, …)` for `ids` to an `IN (` clause.
fn push_ids<'a>(builder: &mut QueryBuilder<'a, Sqlite>, ids: &'a [EntityId]) {
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id.as_str());
    }
    separated.push_unseparated(")");
}
