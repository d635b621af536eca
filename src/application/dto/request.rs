//! Request DTOs
//!
//! Data structures for API request bodies. Required fields are `Option`s so
//! that absence is reported as a validation error instead of a decode error.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 150, message = "Username must be 1-150 characters")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 128, message = "Password must be 1-128 characters")
    )]
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub password: Option<String>,
}

/// Create chat request
///
/// `invited` is either a JSON-encoded list string or a native array.
#[derive(Debug, Default, Deserialize)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub invited: Option<Value>,
}

/// Send message request
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Target chat when it is not part of the path
    #[serde(default)]
    pub chat_id: Option<Value>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub text: Option<String>,
}

/// Interpret a chat id given as a JSON number or a numeric string.
pub fn parse_chat_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
