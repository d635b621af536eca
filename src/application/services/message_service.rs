//! Message Service
//!
//! Handles posting messages to chats and reading chat history.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ChatRepository, Message, MessageRepository, NewMessage, User};

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Post a message to a chat the author participates in
    async fn send_message(&self, chat_id: i64, author: &User, text: &str) -> Result<Message, MessageError>;

    /// All messages of a chat the requester participates in, oldest first
    async fn history(&self, chat_id: i64, requester: &User) -> Result<Vec<Message>, MessageError>;
}

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The chat is unknown or the user is not one of its participants.
    /// Both cases share one variant so callers cannot probe for chat ids.
    #[error("Chat does not exist")]
    ChatNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// MessageService implementation
pub struct MessageServiceImpl<M, C>
where
    M: MessageRepository,
    C: ChatRepository,
{
    message_repo: Arc<M>,
    chat_repo: Arc<C>,
}

impl<M, C> MessageServiceImpl<M, C>
where
    M: MessageRepository,
    C: ChatRepository,
{
    pub fn new(message_repo: Arc<M>, chat_repo: Arc<C>) -> Self {
        Self {
            message_repo,
            chat_repo,
        }
    }
}

#[async_trait]
impl<M, C> MessageService for MessageServiceImpl<M, C>
where
    M: MessageRepository + 'static,
    C: ChatRepository + 'static,
{
    async fn send_message(&self, chat_id: i64, author: &User, text: &str) -> Result<Message, MessageError> {
        let new_message = NewMessage {
            chat_id,
            author_id: author.id,
            text: text.to_string(),
        };

        let message = self
            .message_repo
            .create_for_participant(&new_message)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::ChatNotFound)?;

        tracing::info!(
            message_id = message.id,
            chat_id,
            author_id = author.id,
            "Message sent"
        );

        Ok(message)
    }

    async fn history(&self, chat_id: i64, requester: &User) -> Result<Vec<Message>, MessageError> {
        let allowed = self
            .chat_repo
            .is_participant(chat_id, requester.id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        if !allowed {
            return Err(MessageError::ChatNotFound);
        }

        self.message_repo
            .find_by_chat(chat_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }
}
