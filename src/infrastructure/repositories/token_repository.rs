//! Auth Token Repository Implementation
//!
//! PostgreSQL implementation of the AuthTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{AuthToken, AuthTokenRepository};
use crate::shared::error::AppError;

/// Database row representation matching the auth_tokens table schema.
#[derive(Debug, sqlx::FromRow)]
struct TokenRow {
    digest: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<TokenRow> for AuthToken {
    fn from(row: TokenRow) -> Self {
        Self {
            digest: row.digest,
            user_id: row.user_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

/// PostgreSQL token repository implementation.
#[derive(Clone)]
pub struct PgAuthTokenRepository {
    pool: PgPool,
}

impl PgAuthTokenRepository {
    /// Create a new PgAuthTokenRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthTokenRepository for PgAuthTokenRepository {
    async fn create(&self, token: &AuthToken) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (digest, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&token.digest)
        .bind(token.user_id)
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_digest(&self, digest: &str) -> Result<Option<AuthToken>, AppError> {
        let row = sqlx::query_as::<_, TokenRow>(
            r#"
            SELECT digest, user_id, created_at, expires_at
            FROM auth_tokens
            WHERE digest = $1
            "#,
        )
        .bind(digest)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthToken::from))
    }

    async fn delete(&self, digest: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE digest = $1")
            .bind(digest)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
