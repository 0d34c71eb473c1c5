//! Validated runtime settings for the upload service

use std::env;

use axum::http::HeaderValue;
use thiserror::Error;

/// Default region when `AWS_REGION` is unset
pub const DEFAULT_REGION: &str = "us-east-1";
/// Default presigned URL lifetime: one day
pub const DEFAULT_PRESIGNED_URL_EXPIRY_SECS: u64 = 86_400;
/// Default CORS origin
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";
/// Default decoded image size limit: 10 MiB
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10_485_760;

/// Errors raised while building [`Settings`]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is missing or empty
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A numeric environment variable could not be parsed
    #[error("Environment variable {key} must be an integer, got: {value:?}")]
    NotAnInteger {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
    },

    /// A numeric setting was zero or negative
    #[error("{0} must be positive")]
    NotPositive(&'static str),

    /// The allowed origin cannot be sent as a header value
    #[error("ALLOWED_ORIGIN is not a valid header value: {0:?}")]
    InvalidOrigin(String),

    /// `APP_ENV` holds an unknown stage
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),
}

/// Application settings, immutable after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    photos_bucket: String,
    aws_region: String,
    presigned_url_expiry_secs: u64,
    allowed_origin: String,
    max_image_bytes: usize,
}

impl Settings {
    /// Builds settings from explicit values
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::MissingVar` if the bucket name is empty
    /// Returns `SettingsError::NotPositive` if the expiry or the size limit is zero
    /// Returns `SettingsError::InvalidOrigin` if the origin is empty or not header-safe
    pub fn new(
        photos_bucket: impl Into<String>,
        aws_region: impl Into<String>,
        presigned_url_expiry_secs: u64,
        allowed_origin: impl Into<String>,
        max_image_bytes: usize,
    ) -> Result<Self, SettingsError> {
        let photos_bucket = photos_bucket.into();
        let allowed_origin = allowed_origin.into();

        if photos_bucket.trim().is_empty() {
            return Err(SettingsError::MissingVar("PHOTOS_BUCKET"));
        }
        if presigned_url_expiry_secs == 0 {
            return Err(SettingsError::NotPositive("PRESIGNED_URL_EXPIRY_SECONDS"));
        }
        if max_image_bytes == 0 {
            return Err(SettingsError::NotPositive("MAX_IMAGE_BYTES"));
        }
        if allowed_origin.is_empty() || HeaderValue::from_str(&allowed_origin).is_err() {
            return Err(SettingsError::InvalidOrigin(allowed_origin));
        }

        Ok(Self {
            photos_bucket,
            aws_region: aws_region.into(),
            presigned_url_expiry_secs,
            allowed_origin,
            max_image_bytes,
        })
    }

    /// Reads settings from the process environment
    ///
    /// # Errors
    ///
    /// Returns a `SettingsError` if `PHOTOS_BUCKET` is missing or any value fails validation
    pub fn from_env() -> Result<Self, SettingsError> {
        let photos_bucket = env::var("PHOTOS_BUCKET")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(SettingsError::MissingVar("PHOTOS_BUCKET"))?;
        let aws_region = env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());
        let allowed_origin =
            env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());

        let expiry = positive_env(
            "PRESIGNED_URL_EXPIRY_SECONDS",
            DEFAULT_PRESIGNED_URL_EXPIRY_SECS,
        )?;
        let max_image_bytes = positive_env("MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES as u64)?;
        let max_image_bytes = usize::try_from(max_image_bytes)
            .map_err(|_| SettingsError::NotAnInteger {
                key: "MAX_IMAGE_BYTES",
                value: max_image_bytes.to_string(),
            })?;

        Self::new(
            photos_bucket,
            aws_region,
            expiry,
            allowed_origin,
            max_image_bytes,
        )
    }

    /// Bucket photos are written to
    #[must_use]
    pub fn photos_bucket(&self) -> &str {
        &self.photos_bucket
    }

    /// AWS region of the bucket
    #[must_use]
    pub fn aws_region(&self) -> &str {
        &self.aws_region
    }

    /// Lifetime of issued download URLs, in seconds
    #[must_use]
    pub const fn presigned_url_expiry_secs(&self) -> u64 {
        self.presigned_url_expiry_secs
    }

    /// Value sent in `Access-Control-Allow-Origin`
    #[must_use]
    pub fn allowed_origin(&self) -> &str {
        &self.allowed_origin
    }

    /// Largest accepted decoded image, in bytes
    #[must_use]
    pub const fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }
}

/// Reads an integer variable, falling back to `default` when unset.
/// Parsed as signed so negative input reports as non-positive rather than unparsable.
fn positive_env(key: &'static str, default: u64) -> Result<u64, SettingsError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| SettingsError::NotAnInteger {
            key,
            value: raw.clone(),
        })?;

    u64::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or(SettingsError::NotPositive(key))
}
