//! Error taxonomy for the upload pipeline

use axum::http::StatusCode;
use thiserror::Error;

use crate::media_storage::StoreError;

/// Every way an upload can fail.
///
/// Each variant maps to a fixed HTTP status and machine-readable code; the
/// message is safe to show to clients.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Empty payload, malformed base64 or missing JPEG magic bytes
    #[error("{message}")]
    InvalidImage {
        /// Client-facing reason
        message: String,
    },

    /// Decoded image exceeds the configured limit
    #[error("Image size {size} bytes exceeds limit of {limit} bytes")]
    ImageTooLarge {
        /// Decoded size in bytes
        size: usize,
        /// Configured maximum in bytes
        limit: usize,
    },

    /// Object write or URL signing failed
    #[error("{message}")]
    UploadFailed {
        /// Client-facing reason
        message: String,
        /// Underlying store failure, kept for logs only
        #[source]
        source: StoreError,
    },
}

impl UploadError {
    pub(crate) fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
        }
    }

    pub(crate) fn upload_failed(message: impl Into<String>, source: StoreError) -> Self {
        Self::UploadFailed {
            message: message.into(),
            source,
        }
    }

    /// HTTP status the boundary layer answers with
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidImage { .. } => StatusCode::BAD_REQUEST,
            Self::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UploadFailed { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidImage { .. } => "INVALID_IMAGE",
            Self::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            Self::UploadFailed { .. } => "UPLOAD_FAILED",
        }
    }

    /// Human-readable message
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}
