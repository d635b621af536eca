//! Chat Handlers
//!
//! Chat creation, messaging and history. Unknown chats and chats the caller
//! does not belong to are indistinguishable: 400 when sending, 404 when
//! reading history.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::application::dto::request::{parse_chat_id, CreateChatRequest, SendMessageRequest};
use crate::application::dto::response::{
    ChatPreviewResponse, CreateChatResponse, MessageResponse, SendMessageResponse,
};
use crate::application::services::{ChatError, MessageError};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::Payload;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

fn chat_error(error: ChatError) -> AppError {
    match error {
        ChatError::Internal(msg) => AppError::Internal(msg),
        e => AppError::validation(e.to_string()),
    }
}

fn send_error(error: MessageError) -> AppError {
    match error {
        MessageError::ChatNotFound => AppError::validation(error.to_string()),
        MessageError::Internal(msg) => AppError::Internal(msg),
    }
}

fn history_error(error: MessageError) -> AppError {
    match error {
        MessageError::ChatNotFound => AppError::NotFound(error.to_string()),
        MessageError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Create a chat with the caller and the invited users
pub async fn create_chat(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Payload(body): Payload<CreateChatRequest>,
) -> Result<(StatusCode, Json<CreateChatResponse>), AppError> {
    let chat = state
        .chats
        .create_chat(&auth.user, body.invited.as_ref())
        .await
        .map_err(chat_error)?;

    metrics::record_chat_created();

    Ok((
        StatusCode::CREATED,
        Json(CreateChatResponse { chat: chat.into() }),
    ))
}

/// Post a message to the chat named by `chat_id` in the body
pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Payload(body): Payload<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let chat_id = body.chat_id.as_ref().and_then(parse_chat_id);
    post_message(&state, &auth, chat_id, body.text.unwrap_or_default()).await
}

/// Post a message to the chat named in the path
pub async fn send_message_to(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(pk): Path<String>,
    Payload(body): Payload<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    post_message(&state, &auth, pk.parse().ok(), body.text.unwrap_or_default()).await
}

async fn post_message(
    state: &AppState,
    auth: &AuthUser,
    chat_id: Option<i64>,
    text: String,
) -> Result<(StatusCode, Json<SendMessageResponse>), AppError> {
    let chat_id = chat_id.ok_or_else(|| send_error(MessageError::ChatNotFound))?;

    let message = state
        .messages
        .send_message(chat_id, &auth.user, &text)
        .await
        .map_err(send_error)?;

    metrics::record_message_sent();

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            message: message.into(),
        }),
    ))
}

/// Full message history of a chat
pub async fn history(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(pk): Path<String>,
) -> Result<Json<Vec<MessageResponse>>, AppError> {
    let chat_id: i64 = pk
        .parse()
        .map_err(|_| history_error(MessageError::ChatNotFound))?;

    let messages = state
        .messages
        .history(chat_id, &auth.user)
        .await
        .map_err(history_error)?;

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Chats the caller participates in
pub async fn user_chats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ChatPreviewResponse>>, AppError> {
    let chats = state
        .chats
        .list_chats(&auth.user)
        .await
        .map_err(chat_error)?;

    Ok(Json(chats.into_iter().map(ChatPreviewResponse::from).collect()))
}
