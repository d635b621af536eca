//! Authentication token entity and repository trait.
//!
//! Maps to the `auth_tokens` table in the database schema.
//! Clients hold the raw token; only its SHA-256 digest is persisted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::shared::error::AppError;

/// Represents an issued bearer token.
///
/// Maps to the `auth_tokens` table:
/// - digest: CHAR(64) PRIMARY KEY (hex SHA-256 of the raw token)
/// - user_id: BIGINT NOT NULL REFERENCES users(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - expires_at: TIMESTAMPTZ NULL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    /// Hex SHA-256 digest of the raw token
    pub digest: String,

    /// Owner of the token
    pub user_id: i64,

    /// When the token was issued
    pub created_at: DateTime<Utc>,

    /// When the token stops authenticating (None = never)
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthToken {
    /// Create a token record issued now.
    pub fn new(digest: String, user_id: i64, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            digest,
            user_id,
            created_at: Utc::now(),
            expires_at,
        }
    }

    /// Check if the token has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= Utc::now())
    }
}

/// Repository trait for token data access operations.
#[async_trait]
pub trait AuthTokenRepository: Send + Sync {
    /// Store a newly issued token.
    async fn create(&self, token: &AuthToken) -> Result<(), AppError>;

    /// Find a token by digest.
    async fn find_by_digest(&self, digest: &str) -> Result<Option<AuthToken>, AppError>;

    /// Delete a token. Returns whether a row was removed.
    async fn delete(&self, digest: &str) -> Result<bool, AppError>;
}
