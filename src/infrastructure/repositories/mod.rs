//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **UserRepository** - User accounts
//! - **AuthTokenRepository** - Hashed API tokens
//! - **ChatRepository** - Chats and their participant lists
//! - **MessageRepository** - Messages with membership-checked inserts
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgChatRepository, PgUserRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let chat_repo = PgChatRepository::new(pool.clone());
//! }
//! ```

pub mod chat_repository;
pub mod message_repository;
pub mod token_repository;
pub mod user_repository;

pub use chat_repository::PgChatRepository;
pub use message_repository::PgMessageRepository;
pub use token_repository::PgAuthTokenRepository;
pub use user_repository::PgUserRepository;
