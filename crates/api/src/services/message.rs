use mailstub_core::ids::EntityKind;
use mailstub_core::messages::{self, IDS_UNKNOWN, MESSAGE_NOT_FOUND};
use mailstub_core::types::{now, touch, EntityId};
use mailstub_db::models::message::Message;
use mailstub_db::models::user::User;
use mailstub_db::Store;

use super::gone;
use crate::error::AppResult;
use crate::validation::fields::{ID, IDS};
use crate::validation::message::NewMessage;

pub struct MessageService;

impl MessageService {
    /// The user's mailbox, newest first.
    pub async fn list(store: &dyn Store, user: &User) -> AppResult<Vec<Message>> {
        Ok(store.list_messages(&user.id).await?)
    }

    /// Deliver a message. New messages are unread.
    pub async fn create(store: &dyn Store, input: NewMessage) -> AppResult<Message> {
        let at = now();
        let message = Message {
            id: EntityKind::Message.new_id(),
            project_id: input.project_id,
            user_id: input.user_id,
            sender: input.sender,
            receiver: input.receiver,
            subject: input.subject,
            body: input.body,
            read: false,
            created_at: at,
            updated_at: at,
        };

        store.insert_message(&message).await?;

        tracing::info!(
            message_id = %message.id,
            user_id = %message.user_id,
            project_id = %message.project_id,
            "Message delivered"
        );
        Ok(message)
    }

    pub async fn set_read(store: &dyn Store, message: &Message, read: bool) -> AppResult<Message> {
        let updated = store
            .update_message_read(&message.id, read, touch(message.updated_at))
            .await?
            .ok_or_else(|| gone(ID, MESSAGE_NOT_FOUND))?;

        tracing::info!(message_id = %updated.id, read, "Message read flag set");
        Ok(updated)
    }

    pub async fn delete(store: &dyn Store, message: &Message) -> AppResult<String> {
        if !store.delete_message(&message.id).await? {
            return Err(gone(ID, MESSAGE_NOT_FOUND));
        }

        tracing::info!(message_id = %message.id, "Message deleted");
        Ok(messages::deleted(EntityKind::Message))
    }

    /// Delete a validated set of distinct ids in one transaction.
    pub async fn delete_many(store: &dyn Store, ids: &[EntityId]) -> AppResult<String> {
        let removed = store.delete_messages(ids).await?;
        if removed as usize != ids.len() {
            // Deleted concurrently after validation.
            tracing::warn!(requested = ids.len(), removed, "Bulk delete raced another delete");
        }
        if removed == 0 {
            return Err(gone(IDS, IDS_UNKNOWN));
        }

        tracing::info!(count = removed, "Messages deleted");
        Ok(messages::messages_deleted(removed as usize))
    }
}
