//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Rendered as a JSON string body with 404.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing, unknown or expired token. Rendered with an empty body.
    #[error("Unauthorized")]
    Unauthorized,

    /// Rendered as a JSON list of messages with 400.
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Validation error carrying a single message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }
}

/// Error response body for server-side failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, Json(message)).into_response(),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, [(WWW_AUTHENTICATE, "Token")]).into_response()
            }
            AppError::Validation(messages) => {
                (StatusCode::BAD_REQUEST, Json(messages)).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                internal_server_error()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                internal_server_error()
            }
        }
    }
}

fn internal_server_error() -> Response {
    let body = ErrorResponse {
        code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        message: "Internal server error".into(),
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
