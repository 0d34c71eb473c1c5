//! Universal error handling for the API

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::upload::UploadError;

/// JSON error body: `{"error": "<CODE>", "message": "<text>"}`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ApiErrorResponse {
    /// Machine-readable error code
    pub error: &'static str,
    /// Human-readable error message
    pub message: String,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                error: code,
                message: msg.into(),
            },
        }
    }

    /// Generic 500 that never exposes internal details
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An unexpected error occurred",
        )
    }

    /// Request body was not parseable JSON
    #[must_use]
    pub fn invalid_json() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "INVALID_JSON",
            "Request body must be valid JSON",
        )
    }

    /// Request body is over the transport limit, so the image cannot fit either
    #[must_use]
    pub fn body_too_large() -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            "IMAGE_TOO_LARGE",
            "Image exceeds maximum size",
        )
    }

    /// Request body had no usable `image` field
    #[must_use]
    pub fn missing_image() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "MISSING_IMAGE",
            "Request must include 'image' field",
        )
    }

    /// Anything but `POST`/`OPTIONS` on the upload route
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "METHOD_NOT_ALLOWED",
            "Use POST",
        )
    }

    /// Unknown route
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found")
    }

    /// HTTP status of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(self.inner)).into_response()
    }
}

/// Typed upload failures are expected outcomes and logged at warn level
impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match &err {
            UploadError::UploadFailed { source, .. } => tracing::warn!(
                code = err.code(),
                error = %source,
                "Upload rejected: {}",
                err.message()
            ),
            UploadError::InvalidImage { .. } | UploadError::ImageTooLarge { .. } => {
                tracing::warn!(code = err.code(), "Upload rejected: {}", err.message());
            }
        }

        Self::new(err.status(), err.code(), err.message())
    }
}

/// Turns a handler panic into a 500 with the generic error body
#[must_use]
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    tracing::error!(panic = detail, "Unhandled error during request");

    AppError::internal().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media_storage::StoreError;

    #[test]
    fn test_from_upload_error() {
        let err = AppError::from(UploadError::ImageTooLarge {
            size: 20,
            limit: 10,
        });
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.code(), "IMAGE_TOO_LARGE");

        let err = AppError::from(UploadError::UploadFailed {
            message: "Failed to upload image".to_string(),
            source: StoreError::UpstreamError("503 SlowDown".to_string()),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "UPLOAD_FAILED");
        assert_eq!(err.inner.message, "Failed to upload image");
    }

    #[test]
    fn test_panic_response_is_generic() {
        let response = handle_panic(Box::new("secret detail".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
