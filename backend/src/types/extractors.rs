//! Custom extractors for request validation

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::types::error::AppError;

/// Lenient JSON extractor for the upload route.
///
/// Unlike `axum::Json` it does not insist on a `Content-Type` header, treats an
/// empty body as `{}`, and rejects malformed JSON with an `INVALID_JSON` body.
/// Bodies over the router's `DefaultBodyLimit` are rejected as `IMAGE_TOO_LARGE`.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::body_too_large()
                } else {
                    AppError::invalid_json()
                }
            })?;

        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &body
        };

        serde_json::from_slice(body)
            .map(Self)
            .map_err(|_| AppError::invalid_json())
    }
}
