//! User (mailbox) entity model.

use mailstub_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user row from the `users` table. `email` is stored normalized.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub project_id: EntityId,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
