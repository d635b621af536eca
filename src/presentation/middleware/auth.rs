//! Authentication Middleware
//!
//! Opaque token validation for protected routes. Clients send
//! `Authorization: Token <token>`.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::application::services::{token_digest, AuthError};
use crate::domain::User;
use crate::shared::error::AppError;
use crate::startup::AppState;

const TOKEN_SCHEME: &str = "Token";

/// Authenticated user extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    /// Digest of the token presented with this request
    pub token_digest: String,
}

/// Pull the raw token out of an `Authorization` header value.
fn parse_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(TOKEN_SCHEME) {
        return None;
    }

    let token = token.trim();
    (!token.is_empty() && !token.contains(' ')).then_some(token)
}

/// Authentication middleware that resolves tokens to active users
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_token)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let user = state.auth.authenticate(&token).await.map_err(|e| match e {
        AuthError::Internal(msg) => AppError::Internal(msg),
        _ => AppError::Unauthorized,
    })?;

    request.extensions_mut().insert(AuthUser {
        user,
        token_digest: token_digest(&token),
    });

    Ok(next.run(request).await)
}
