//! Message entity model.

use mailstub_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A message row from the `messages` table.
///
/// `user_id` is resolved from `receiver` when the message is created and is
/// never recomputed, so a later email change on the user leaves old
/// messages in the same mailbox.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: EntityId,
    pub project_id: EntityId,
    pub user_id: EntityId,
    pub sender: String,
    pub receiver: String,
    pub subject: String,
    /// Raw body, markup included, returned verbatim.
    pub body: String,
    pub read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
