//! Account Handlers
//!
//! Registration, login and token revocation.

use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::application::dto::request::{LoginRequest, RegisterRequest};
use crate::application::dto::response::AuthResponse;
use crate::application::services::AuthError;
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::Payload;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn auth_error(error: AuthError) -> AppError {
    match error {
        AuthError::InvalidCredentials => AppError::validation(error.to_string()),
        AuthError::UsernameExists | AuthError::InvalidUsername => {
            AppError::validation(format!("username: {}", error))
        }
        AuthError::InvalidToken => AppError::Unauthorized,
        AuthError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Payload(body): Payload<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let (user, token) = state
        .auth
        .register(&username, &password)
        .await
        .map_err(auth_error)?;

    metrics::record_user_registered();

    let response = AuthResponse {
        user: user.into(),
        token,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    Payload(body): Payload<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let (user, token) = state
        .auth
        .login(&username, &password)
        .await
        .map_err(auth_error)?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// Revoke the token used for this request
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<StatusCode, AppError> {
    state
        .auth
        .logout(&auth.token_digest)
        .await
        .map_err(auth_error)?;

    tracing::debug!(user_id = auth.user.id, "Logged out");

    Ok(StatusCode::NO_CONTENT)
}
