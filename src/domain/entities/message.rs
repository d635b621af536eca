//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::User;
use crate::shared::error::AppError;

/// A text message posted to a chat.
///
/// Maps to the `messages` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - chat_id: BIGINT NOT NULL REFERENCES chats(id) ON DELETE CASCADE
/// - author_id: BIGINT NOT NULL REFERENCES users(id)
/// - text: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub chat_id: i64,
    pub author: User,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub chat_id: i64,
    pub author_id: i64,
    pub text: String,
}

/// Repository trait for Message data access operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Insert a message if the author participates in the chat.
    ///
    /// The membership check and the insert happen atomically. Returns `None`
    /// when the chat does not exist or the author is not a participant.
    async fn create_for_participant(&self, message: &NewMessage)
        -> Result<Option<Message>, AppError>;

    /// All messages of a chat in creation order.
    async fn find_by_chat(&self, chat_id: i64) -> Result<Vec<Message>, AppError>;
}
