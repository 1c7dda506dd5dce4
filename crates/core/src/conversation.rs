//! Inbox construction and thread-view de-duplication.
//!
//! A conversation is derived data: the set of messages between one user and
//! one counterparty, possibly spanning several shared projects. These
//! helpers implement the two folds over that data the product needs:
//!
//! - [`build_inbox`] collapses a user's full message history into one entry
//!   per counterparty (most recent message wins).
//! - [`ThreadView`] accumulates a single thread while de-duplicating by
//!   message id, which makes at-least-once realtime delivery harmless: a
//!   message that arrives both as the `send` response and over the push
//!   channel renders exactly once.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// The projection of a message row the conversation folds operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationMessage {
    pub id: DbId,
    pub project_id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

impl ConversationMessage {
    /// The other participant from `user`'s point of view.
    pub fn counterparty(&self, user: DbId) -> DbId {
        if self.sender_id == user {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

/// One inbox row: the latest message exchanged with a counterparty.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InboxEntry {
    pub counterparty_id: DbId,
    pub last_message: String,
    pub last_message_at: Timestamp,
}

/// Build the per-counterparty inbox for `user`.
///
/// `messages` must be every message where `user` is sender or receiver,
/// ordered by `created_at` descending; the first message seen per
/// counterparty is then the latest one, and the output inherits the
/// recency-descending order. Conversations spanning multiple projects
/// collapse into a single entry. The fold is deterministic, so calling it
/// twice over the same input yields identical output.
pub fn build_inbox(user: DbId, messages: &[ConversationMessage]) -> Vec<InboxEntry> {
    let mut seen: HashSet<DbId> = HashSet::new();
    let mut inbox = Vec::new();
    for msg in messages {
        let other = msg.counterparty(user);
        if seen.insert(other) {
            inbox.push(InboxEntry {
                counterparty_id: other,
                last_message: msg.content.clone(),
                last_message_at: msg.created_at,
            });
        }
    }
    inbox
}

/// An accumulating view of one message thread, de-duplicated by message id.
///
/// Consumers feed it both the synchronous results of sends and the
/// asynchronous pushes from the realtime channel; duplicates are dropped.
#[derive(Debug, Default)]
pub struct ThreadView {
    messages: Vec<ConversationMessage>,
    seen_ids: HashSet<DbId>,
}

impl ThreadView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message unless its id has already been seen.
    ///
    /// Returns `true` if the message was appended.
    pub fn apply(&mut self, message: ConversationMessage) -> bool {
        if !self.seen_ids.insert(message.id) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// The project context for composing the next message: the project of
    /// the most recently appended message, if any.
    pub fn active_project(&self) -> Option<DbId> {
        self.messages.last().map(|m| m.project_id)
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
