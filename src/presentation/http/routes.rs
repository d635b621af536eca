//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, track_metrics};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(account_routes())
        .merge(protected_routes(state.clone()))
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        // Replaces the fallback inherited from the authenticated routes
        .fallback(not_found)
        .layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found.".into())
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Account routes (public)
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api/accounts/register", post(handlers::accounts::register))
        .route("/api/accounts/login", post(handlers::accounts::login))
}

/// Routes requiring a token
///
/// `layer` rather than `route_layer` so a wrong method without a token is
/// still answered with 401.
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/accounts/logout", post(handlers::accounts::logout))
        .route("/api/chats/create", post(handlers::chats::create_chat))
        .route("/api/chats/send_message", post(handlers::chats::send_message))
        .route(
            "/api/chats/{pk}/send_message",
            post(handlers::chats::send_message_to),
        )
        .route("/api/chats/{pk}/history", get(handlers::chats::history))
        .route("/api/chats/user", get(handlers::chats::user_chats))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}
