//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Chat, ChatPreview, Message, User};

/// Public user representation; never carries credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Register/login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// Full chat with participants
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub id: i64,
    pub creator: UserResponse,
    pub participants: Vec<UserResponse>,
    pub created_at: DateTime<Utc>,
}

impl From<Chat> for ChatResponse {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            creator: chat.creator.into(),
            participants: chat.participants.into_iter().map(UserResponse::from).collect(),
            created_at: chat.created_at,
        }
    }
}

/// Wrapper returned by chat creation
#[derive(Debug, Serialize)]
pub struct CreateChatResponse {
    pub chat: ChatResponse,
}

/// Chat list entry
#[derive(Debug, Serialize)]
pub struct ChatPreviewResponse {
    pub id: i64,
    pub creator: UserResponse,
    pub created_at: DateTime<Utc>,
}

impl From<ChatPreview> for ChatPreviewResponse {
    fn from(preview: ChatPreview) -> Self {
        Self {
            id: preview.id,
            creator: preview.creator.into(),
            created_at: preview.created_at,
        }
    }
}

/// Message as returned by send and history
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub author: UserResponse,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            author: message.author.into(),
            text: message.text,
            created_at: message.created_at,
        }
    }
}

/// Wrapper returned by message send
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message: MessageResponse,
}
