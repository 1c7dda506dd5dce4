//! Message entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use codabrate_core::conversation::ConversationMessage;
use codabrate_core::types::{DbId, Timestamp};

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub project_id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl From<&Message> for ConversationMessage {
    fn from(m: &Message) -> Self {
        ConversationMessage {
            id: m.id,
            project_id: m.project_id,
            sender_id: m.sender_id,
            receiver_id: m.receiver_id,
            content: m.content.clone(),
            created_at: m.created_at,
        }
    }
}

/// DTO for inserting a message.
#[derive(Debug)]
pub struct CreateMessage {
    pub project_id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub content: String,
}

/// Request body for `POST /messages/{user_id}`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    /// Project context hint; required when no prior message exists in the
    /// thread, otherwise the thread's most recent project is used.
    pub project_id: Option<DbId>,
}
