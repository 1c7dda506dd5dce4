//! Repository for the `messages` table.
//!
//! Ordering always uses the server-assigned `created_at`; client clocks are
//! never consulted. Threads span projects: the pair of user ids is the key,
//! not (pair, project).

use sqlx::PgPool;
use codabrate_core::types::DbId;

use crate::models::message::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, sender_id, receiver_id, content, is_read, created_at";

/// Provides operations on the message history.
pub struct MessageRepo;

impl MessageRepo {
    /// Insert a message, returning the persisted row (server-assigned id
    /// and timestamp) so the sender can render it without waiting for the
    /// realtime fan-out.
    pub async fn create(pool: &PgPool, input: &CreateMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (project_id, sender_id, receiver_id, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.project_id)
            .bind(input.sender_id)
            .bind(input.receiver_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// All messages between two users in either direction, across all
    /// shared projects, oldest first.
    pub async fn list_between(
        pool: &PgPool,
        user_a: DbId,
        user_b: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages \
             WHERE (sender_id = $1 AND receiver_id = $2) \
                OR (sender_id = $2 AND receiver_id = $1) \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_a)
            .bind(user_b)
            .fetch_all(pool)
            .await
    }

    /// Every message the user sent or received, newest first. Input for the
    /// inbox fold.
    pub async fn list_all_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages \
             WHERE sender_id = $1 OR receiver_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The project of the most recent message between two users, used as
    /// the composing context when the caller supplies no explicit hint.
    pub async fn latest_project_between(
        pool: &PgPool,
        user_a: DbId,
        user_b: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT project_id FROM messages \
             WHERE (sender_id = $1 AND receiver_id = $2) \
                OR (sender_id = $2 AND receiver_id = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT 1",
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(pool)
        .await
    }

    /// Mark every unread message the reader received from the counterparty
    /// as read. Returns the number of messages flipped.
    pub async fn mark_thread_read(
        pool: &PgPool,
        reader_id: DbId,
        counterparty_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE \
             WHERE receiver_id = $1 AND sender_id = $2 AND is_read = FALSE",
        )
        .bind(reader_id)
        .bind(counterparty_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread messages waiting for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
