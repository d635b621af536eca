//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the chat backend.
//! All entities map directly to their corresponding database tables.
//!
//! - **User**: User account with credentials and activity flags
//! - **AuthToken**: Digest of an issued API token
//! - **Chat**: A chat room with a creator and a fixed participant set
//! - **Message**: A text message posted to a chat
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod auth_token;
mod chat;
mod message;
mod user;

pub use auth_token::{AuthToken, AuthTokenRepository};
pub use chat::{Chat, ChatPreview, ChatRepository};
pub use message::{Message, MessageRepository, NewMessage};
pub use user::{NewUser, User, UserRepository, MAX_USERNAME_LENGTH};

#[cfg(test)]
pub use chat::MockChatRepository;
#[cfg(test)]
pub use user::MockUserRepository;
