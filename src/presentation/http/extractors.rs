//! Custom Extractors
//!
//! Axum extractors for request parsing.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::shared::error::AppError;

/// Request body decoded from JSON or a urlencoded form
///
/// The content type picks the decoder. A body without a content type must be
/// empty and decodes as `{}`, so absent fields surface as validation errors.
/// Rejections render as a single-entry 400 list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase());

        match content_type {
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| rejected(rejection.body_text()))?;
                Ok(Self(value))
            }
            Some(_) => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| rejected(rejection.body_text()))?;
                Ok(Self(value))
            }
            None => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| rejected(rejection.body_text()))?;
                if !bytes.iter().all(u8::is_ascii_whitespace) {
                    return Err(rejected(
                        "Expected request with `Content-Type: application/json`".into(),
                    ));
                }
                serde_json::from_slice(b"{}")
                    .map(Self)
                    .map_err(|e| rejected(e.to_string()))
            }
        }
    }
}

fn rejected(message: String) -> AppError {
    tracing::debug!(error = %message, "Rejected request body");
    AppError::validation(message)
}
