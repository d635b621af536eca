//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod accounts;
pub mod chats;
pub mod health;
