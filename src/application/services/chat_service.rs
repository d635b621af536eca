//! Chat Service
//!
//! Handles chat creation with invited participants and the per-user chat list.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::services::{decode_invited, InvitationError};
use crate::domain::{Chat, ChatPreview, ChatRepository, User, UserRepository};

/// Chat service trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Create a chat owned by `creator` with the users listed in `invited`
    async fn create_chat(&self, creator: &User, invited: Option<&Value>) -> Result<Chat, ChatError>;

    /// Chats the user participates in, oldest first
    async fn list_chats(&self, user: &User) -> Result<Vec<ChatPreview>, ChatError>;
}

/// Chat service errors
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Invitation(#[from] InvitationError),

    #[error("You cannot invite yourself to a chat")]
    SelfInvite,

    #[error("One or more invited users are not registered yet")]
    UnknownInvitee,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// ChatService implementation
pub struct ChatServiceImpl<U, C>
where
    U: UserRepository,
    C: ChatRepository,
{
    user_repo: Arc<U>,
    chat_repo: Arc<C>,
}

impl<U, C> ChatServiceImpl<U, C>
where
    U: UserRepository,
    C: ChatRepository,
{
    pub fn new(user_repo: Arc<U>, chat_repo: Arc<C>) -> Self {
        Self {
            user_repo,
            chat_repo,
        }
    }

    /// Resolve the invited list to participant ids, creator first.
    ///
    /// Entries are checked in list order and the first bad entry wins, so a
    /// malformed entry after an unknown user reports the unknown user.
    async fn resolve_participants(
        &self,
        creator: &User,
        invited: Option<&Value>,
    ) -> Result<Vec<i64>, ChatError> {
        let entries = decode_invited(invited)?;

        let mut participants = vec![creator.id];
        for entry in entries {
            let user_id = entry.user_id()?;
            if user_id == creator.id {
                return Err(ChatError::SelfInvite);
            }

            let exists = self
                .user_repo
                .find_by_id(user_id)
                .await
                .map_err(|e| ChatError::Internal(e.to_string()))?
                .is_some();
            if !exists {
                return Err(ChatError::UnknownInvitee);
            }

            if !participants.contains(&user_id) {
                participants.push(user_id);
            }
        }

        Ok(participants)
    }
}

#[async_trait]
impl<U, C> ChatService for ChatServiceImpl<U, C>
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
{
    async fn create_chat(&self, creator: &User, invited: Option<&Value>) -> Result<Chat, ChatError> {
        let participants = self.resolve_participants(creator, invited).await?;

        let chat = self
            .chat_repo
            .create(creator.id, &participants)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        tracing::info!(
            chat_id = chat.id,
            creator_id = creator.id,
            participants = chat.participants.len(),
            "Chat created"
        );

        Ok(chat)
    }

    async fn list_chats(&self, user: &User) -> Result<Vec<ChatPreview>, ChatError> {
        self.chat_repo
            .find_by_participant(user.id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))
    }
}
