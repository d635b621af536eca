//! Message Repository Implementation
//!
//! PostgreSQL implementation of message storage. Inserts are conditional on
//! chat membership so the check and the write happen in one statement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Message, MessageRepository, NewMessage, User};
use crate::shared::error::AppError;

/// Message row joined with its author.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    chat_id: i64,
    text: String,
    created_at: DateTime<Utc>,
    author_id: i64,
    author_username: String,
    author_password_hash: String,
    author_is_active: bool,
    author_is_admin: bool,
    author_created_at: DateTime<Utc>,
}

impl MessageRow {
    /// Converts database row to domain Message entity.
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            chat_id: self.chat_id,
            author: User {
                id: self.author_id,
                username: self.author_username,
                password_hash: self.author_password_hash,
                is_active: self.author_is_active,
                is_admin: self.author_is_admin,
                created_at: self.author_created_at,
            },
            text: self.text,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL message repository implementation.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Creates a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create_for_participant(
        &self,
        message: &NewMessage,
    ) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            WITH inserted AS (
                INSERT INTO messages (chat_id, author_id, text)
                SELECT $1, $2, $3
                WHERE EXISTS(
                    SELECT 1 FROM chat_participants WHERE chat_id = $1 AND user_id = $2
                )
                RETURNING id, chat_id, author_id, text, created_at
            )
            SELECT m.id, m.chat_id, m.text, m.created_at,
                   u.id AS author_id, u.username AS author_username,
                   u.password_hash AS author_password_hash, u.is_active AS author_is_active,
                   u.is_admin AS author_is_admin, u.created_at AS author_created_at
            FROM inserted m
            JOIN users u ON u.id = m.author_id
            "#,
        )
        .bind(message.chat_id)
        .bind(message.author_id)
        .bind(&message.text)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MessageRow::into_message))
    }

    /// Full history of a chat in insertion order.
    async fn find_by_chat(&self, chat_id: i64) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT m.id, m.chat_id, m.text, m.created_at,
                   u.id AS author_id, u.username AS author_username,
                   u.password_hash AS author_password_hash, u.is_active AS author_is_active,
                   u.is_admin AS author_is_admin, u.created_at AS author_created_at
            FROM messages m
            JOIN users u ON u.id = m.author_id
            WHERE m.chat_id = $1
            ORDER BY m.id
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MessageRow::into_message).collect())
    }
}
