//! In-Memory Store
//!
//! Process-local implementation of every repository trait. Used by tests and
//! by deployments with `database.in_memory = true`. All tables live behind a
//! single lock so multi-row writes are atomic, mirroring the transactions of
//! the PostgreSQL repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{
    AuthToken, AuthTokenRepository, Chat, ChatPreview, ChatRepository, Message, MessageRepository,
    NewMessage, NewUser, User, UserRepository,
};
use crate::shared::error::AppError;

#[derive(Debug, Clone)]
struct ChatRow {
    id: i64,
    creator_id: i64,
    participant_ids: Vec<i64>,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct MessageRow {
    id: i64,
    chat_id: i64,
    author_id: i64,
    text: String,
    created_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tokens: HashMap<String, AuthToken>,
    chats: Vec<ChatRow>,
    messages: Vec<MessageRow>,
    next_user_id: i64,
    next_chat_id: i64,
    next_message_id: i64,
}

impl Tables {
    fn user(&self, id: i64) -> Result<User, AppError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("dangling user reference {}", id)))
    }

    fn hydrate_chat(&self, row: &ChatRow) -> Result<Chat, AppError> {
        let participants = row
            .participant_ids
            .iter()
            .map(|id| self.user(*id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Chat {
            id: row.id,
            creator: self.user(row.creator_id)?,
            participants,
            created_at: row.created_at,
        })
    }

    fn hydrate_message(&self, row: &MessageRow) -> Result<Message, AppError> {
        Ok(Message {
            id: row.id,
            chat_id: row.chat_id,
            author: self.user(row.author_id)?,
            text: row.text.clone(),
            created_at: row.created_at,
        })
    }
}

/// Repository backend holding all state in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a user's active flag. Returns false for unknown users.
    pub fn set_active(&self, user_id: i64, active: bool) -> bool {
        let mut tables = self.tables.write();
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .tables
            .read()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.tables.read().users.iter().any(|u| u.username == username))
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::validation(
                "username: A user with that username already exists.",
            ));
        }

        tables.next_user_id += 1;
        let created = User {
            id: tables.next_user_id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            is_active: true,
            is_admin: user.is_admin,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());

        Ok(created)
    }
}

#[async_trait]
impl AuthTokenRepository for MemoryStore {
    async fn create(&self, token: &AuthToken) -> Result<(), AppError> {
        self.tables
            .write()
            .tokens
            .insert(token.digest.clone(), token.clone());
        Ok(())
    }

    async fn find_by_digest(&self, digest: &str) -> Result<Option<AuthToken>, AppError> {
        Ok(self.tables.read().tokens.get(digest).cloned())
    }

    async fn delete(&self, digest: &str) -> Result<bool, AppError> {
        Ok(self.tables.write().tokens.remove(digest).is_some())
    }
}

#[async_trait]
impl ChatRepository for MemoryStore {
    async fn create(&self, creator_id: i64, participant_ids: &[i64]) -> Result<Chat, AppError> {
        let mut tables = self.tables.write();

        tables.next_chat_id += 1;
        let row = ChatRow {
            id: tables.next_chat_id,
            creator_id,
            participant_ids: participant_ids.to_vec(),
            created_at: Utc::now(),
        };

        // Resolve before inserting so a dangling id leaves no row behind
        let chat = tables.hydrate_chat(&row)?;
        tables.chats.push(row);

        Ok(chat)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError> {
        let tables = self.tables.read();
        tables
            .chats
            .iter()
            .find(|c| c.id == id)
            .map(|row| tables.hydrate_chat(row))
            .transpose()
    }

    async fn is_participant(&self, chat_id: i64, user_id: i64) -> Result<bool, AppError> {
        Ok(self
            .tables
            .read()
            .chats
            .iter()
            .any(|c| c.id == chat_id && c.participant_ids.contains(&user_id)))
    }

    async fn find_by_participant(&self, user_id: i64) -> Result<Vec<ChatPreview>, AppError> {
        let tables = self.tables.read();
        tables
            .chats
            .iter()
            .filter(|c| c.participant_ids.contains(&user_id))
            .map(|row| {
                Ok(ChatPreview {
                    id: row.id,
                    creator: tables.user(row.creator_id)?,
                    created_at: row.created_at,
                })
            })
            .collect()
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn create_for_participant(
        &self,
        message: &NewMessage,
    ) -> Result<Option<Message>, AppError> {
        let mut tables = self.tables.write();

        let allowed = tables
            .chats
            .iter()
            .any(|c| c.id == message.chat_id && c.participant_ids.contains(&message.author_id));
        if !allowed {
            return Ok(None);
        }

        tables.next_message_id += 1;
        let row = MessageRow {
            id: tables.next_message_id,
            chat_id: message.chat_id,
            author_id: message.author_id,
            text: message.text.clone(),
            created_at: Utc::now(),
        };
        let created = tables.hydrate_message(&row)?;
        tables.messages.push(row);

        Ok(Some(created))
    }

    async fn find_by_chat(&self, chat_id: i64) -> Result<Vec<Message>, AppError> {
        let tables = self.tables.read();
        tables
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .map(|row| tables.hydrate_message(row))
            .collect()
    }
}
