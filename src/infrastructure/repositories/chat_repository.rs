//! Chat Repository Implementation
//!
//! PostgreSQL implementation of the ChatRepository trait. Participants are
//! stored in `chat_participants` and returned in insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::user_repository::UserRow;
use crate::domain::{Chat, ChatPreview, ChatRepository, User};
use crate::shared::error::AppError;

/// Chat row joined with its creator.
#[derive(Debug, sqlx::FromRow)]
struct ChatRow {
    id: i64,
    created_at: DateTime<Utc>,
    creator_id: i64,
    creator_username: String,
    creator_password_hash: String,
    creator_is_active: bool,
    creator_is_admin: bool,
    creator_created_at: DateTime<Utc>,
}

impl ChatRow {
    fn creator(&self) -> User {
        User {
            id: self.creator_id,
            username: self.creator_username.clone(),
            password_hash: self.creator_password_hash.clone(),
            is_active: self.creator_is_active,
            is_admin: self.creator_is_admin,
            created_at: self.creator_created_at,
        }
    }

    fn into_preview(self) -> ChatPreview {
        ChatPreview {
            id: self.id,
            creator: self.creator(),
            created_at: self.created_at,
        }
    }

    fn into_chat(self, participants: Vec<User>) -> Chat {
        Chat {
            id: self.id,
            creator: self.creator(),
            participants,
            created_at: self.created_at,
        }
    }
}

const CHAT_SELECT: &str = r#"
    SELECT c.id, c.created_at,
           u.id AS creator_id, u.username AS creator_username,
           u.password_hash AS creator_password_hash, u.is_active AS creator_is_active,
           u.is_admin AS creator_is_admin, u.created_at AS creator_created_at
    FROM chats c
    JOIN users u ON u.id = c.creator_id
"#;

/// PostgreSQL chat repository implementation.
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn participants(&self, chat_id: i64) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.username, u.password_hash, u.is_active, u.is_admin, u.created_at
            FROM chat_participants cp
            JOIN users u ON u.id = cp.user_id
            WHERE cp.chat_id = $1
            ORDER BY cp.id
            "#,
        )
        .bind(chat_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserRow::into_user).collect())
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    async fn create(&self, creator_id: i64, participant_ids: &[i64]) -> Result<Chat, AppError> {
        let mut tx = self.pool.begin().await?;

        let chat_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO chats (creator_id) VALUES ($1) RETURNING id",
        )
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await?;

        for &user_id in participant_ids {
            sqlx::query("INSERT INTO chat_participants (chat_id, user_id) VALUES ($1, $2)")
                .bind(chat_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.find_by_id(chat_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("chat {} vanished after insert", chat_id)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError> {
        let row = sqlx::query_as::<_, ChatRow>(&format!("{} WHERE c.id = $1", CHAT_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let participants = self.participants(row.id).await?;
                Ok(Some(row.into_chat(participants)))
            }
            None => Ok(None),
        }
    }

    async fn is_participant(&self, chat_id: i64, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM chat_participants WHERE chat_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(chat_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn find_by_participant(&self, user_id: i64) -> Result<Vec<ChatPreview>, AppError> {
        let rows = sqlx::query_as::<_, ChatRow>(&format!(
            r#"{}
            WHERE EXISTS(
                SELECT 1 FROM chat_participants cp WHERE cp.chat_id = c.id AND cp.user_id = $1
            )
            ORDER BY c.id
            "#,
            CHAT_SELECT
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatRow::into_preview).collect())
    }
}
