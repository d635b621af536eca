//! Authentication Service
//!
//! Handles user registration, credential checks and opaque token management.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::{distr::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

use crate::domain::{
    AuthToken, AuthTokenRepository, NewUser, User, UserRepository, MAX_USERNAME_LENGTH,
};
use crate::shared::error::AppError;

/// Length of the raw token handed to clients.
pub const TOKEN_LENGTH: usize = 64;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue a token
    async fn register(&self, username: &str, password: &str) -> Result<(User, String), AuthError>;

    /// Check credentials and issue a token
    async fn login(&self, username: &str, password: &str) -> Result<(User, String), AuthError>;

    /// Delete the token with the given digest
    async fn logout(&self, token_digest: &str) -> Result<(), AuthError>;

    /// Resolve a raw token to its active user
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;

    /// Create an active admin account without issuing a token
    async fn create_superuser(&self, username: &str, password: &str) -> Result<User, AuthError>;
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("A user with that username already exists.")]
    UsernameExists,

    #[error("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.")]
    InvalidUsername,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// AuthService implementation
pub struct AuthServiceImpl<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    token_ttl: Option<Duration>,
}

impl<U, T> AuthServiceImpl<U, T>
where
    U: UserRepository,
    T: AuthTokenRepository,
{
    /// Create a new AuthServiceImpl. `token_ttl` of `None` issues non-expiring tokens.
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, token_ttl: Option<Duration>) -> Self {
        Self {
            user_repo,
            token_repo,
            token_ttl,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Issue a fresh token for a user, storing only its digest
    async fn issue_token(&self, user_id: i64) -> Result<String, AuthError> {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let expires_at = match self.token_ttl {
            Some(ttl) => Some(Utc::now().checked_add_signed(ttl).ok_or_else(|| {
                AuthError::Internal(format!("Token lifetime {} overflows the clock", ttl))
            })?),
            None => None,
        };
        let record = AuthToken::new(token_digest(&token), user_id, expires_at);

        self.token_repo
            .create(&record)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(token)
    }

    async fn create_user(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<User, AuthError> {
        if !User::is_valid_username(username) || username.chars().count() > MAX_USERNAME_LENGTH {
            return Err(AuthError::InvalidUsername);
        }

        if self
            .user_repo
            .username_exists(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
        {
            return Err(AuthError::UsernameExists);
        }

        let new_user = NewUser {
            username: username.to_string(),
            password_hash: Self::hash_password(password)?,
            is_admin,
        };

        self.user_repo.create(&new_user).await.map_err(|e| match e {
            // Lost a race against a concurrent registration
            AppError::Validation(_) => AuthError::UsernameExists,
            e => AuthError::Internal(e.to_string()),
        })
    }
}

/// Hex SHA-256 digest under which a raw token is stored
pub fn token_digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl<U, T> AuthService for AuthServiceImpl<U, T>
where
    U: UserRepository + 'static,
    T: AuthTokenRepository + 'static,
{
    async fn register(&self, username: &str, password: &str) -> Result<(User, String), AuthError> {
        let user = self.create_user(username, password, false).await?;
        let token = self.issue_token(user.id).await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok((user, token))
    }

    async fn login(&self, username: &str, password: &str) -> Result<(User, String), AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .filter(|user| user.is_active)
            .ok_or(AuthError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(user.id).await?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok((user, token))
    }

    async fn logout(&self, token_digest: &str) -> Result<(), AuthError> {
        let deleted = self
            .token_repo
            .delete(token_digest)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if !deleted {
            return Err(AuthError::InvalidToken);
        }

        tracing::info!("Token revoked");

        Ok(())
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let digest = token_digest(token);

        let record = self
            .token_repo
            .find_by_digest(&digest)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidToken)?;

        if record.is_expired() {
            self.token_repo
                .delete(&digest)
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))?;
            tracing::debug!(user_id = record.user_id, "Expired token removed");
            return Err(AuthError::InvalidToken);
        }

        self.user_repo
            .find_by_id(record.user_id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .filter(|user| user.is_active)
            .ok_or(AuthError::InvalidToken)
    }

    async fn create_superuser(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self.create_user(username, password, true).await?;

        tracing::info!(user_id = user.id, username = %user.username, "Superuser created");

        Ok(user)
    }
}
