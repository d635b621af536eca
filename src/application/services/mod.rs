//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Registration, login, opaque token issue and revocation
//! - **ChatService**: Chat creation and the per-user chat list
//! - **MessageService**: Posting messages and reading chat history

pub mod auth_service;
pub mod chat_service;
pub mod message_service;

pub use auth_service::{token_digest, AuthError, AuthService, AuthServiceImpl};
pub use chat_service::{ChatError, ChatService, ChatServiceImpl};
pub use message_service::{MessageError, MessageService, MessageServiceImpl};
