//! Chat entity and repository trait.
//!
//! Maps to the `chats` and `chat_participants` tables in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::User;
use crate::shared::error::AppError;

/// A chat room with a fixed participant set.
///
/// Maps to the `chats` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - creator_id: BIGINT NOT NULL REFERENCES users(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Participants live in `chat_participants (id, chat_id, user_id)`, ordered by
/// their row id. The creator is always the first participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
    pub creator: User,
    pub participants: Vec<User>,
    pub created_at: DateTime<Utc>,
}

/// Reduced projection used when listing a user's chats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPreview {
    pub id: i64,
    pub creator: User,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for Chat data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Create a chat and its participant rows atomically.
    ///
    /// `participant_ids` must start with the creator and contain no duplicates.
    async fn create(&self, creator_id: i64, participant_ids: &[i64]) -> Result<Chat, AppError>;

    /// Find a chat with its creator and participants.
    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError>;

    /// Whether `user_id` participates in `chat_id`. False for unknown chats.
    async fn is_participant(&self, chat_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// All chats a user participates in, in creation order.
    async fn find_by_participant(&self, user_id: i64) -> Result<Vec<ChatPreview>, AppError>;
}
