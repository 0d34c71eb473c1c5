//! Photo upload pipeline: decode, store, sign.
//!
//! The pipeline is strictly sequential. Nothing touches the object store until
//! the payload has been decoded and validated, and no URL is signed until the
//! write has succeeded. A signing failure leaves the written object in place.
//!
//! Only the first two bytes are checked against the JPEG start-of-image
//! marker; a truncated or corrupt JPEG with a valid marker is accepted.

mod error;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use uuid::Uuid;

use crate::{media_storage::ObjectStore, types::Settings};

pub use error::UploadError;

/// Logical prefix of every stored photo
pub const KEY_PREFIX: &str = "photos/";
/// Extension of every stored photo
pub const KEY_EXTENSION: &str = ".jpg";
/// Content type objects are tagged with
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// JPEG start-of-image marker
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
/// How far into the payload a data-URI separator is looked for
const DATA_URI_LOOKAHEAD: usize = 64;

/// A stored photo and a time-limited link to download it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    /// Object key, `photos/<32 hex>.jpg`
    pub key: String,
    /// Presigned GET URL for `key`
    pub url: String,
}

/// Decodes a base64 (optionally data-URI prefixed) payload into JPEG bytes.
///
/// # Errors
///
/// Returns `UploadError::InvalidImage` if the payload is empty, not strict base64,
/// or does not start with the JPEG marker.
/// Returns `UploadError::ImageTooLarge` if the decoded bytes exceed `max_bytes`.
pub fn decode_image(payload: &str, max_bytes: usize) -> Result<Vec<u8>, UploadError> {
    if payload.is_empty() {
        return Err(UploadError::invalid_image("Empty image payload"));
    }

    let data = strip_data_uri(payload);

    let raw = STANDARD
        .decode(data)
        .map_err(|_| UploadError::invalid_image("Image is not valid base64"))?;

    if raw.len() > max_bytes {
        return Err(UploadError::ImageTooLarge {
            size: raw.len(),
            limit: max_bytes,
        });
    }

    if !raw.starts_with(&JPEG_SOI) {
        return Err(UploadError::invalid_image(
            "Image does not appear to be a valid JPEG",
        ));
    }

    Ok(raw)
}

/// Drops a `data:...;base64,` style prefix if a comma shows up early enough
fn strip_data_uri(payload: &str) -> &str {
    payload
        .char_indices()
        .take(DATA_URI_LOOKAHEAD)
        .find(|&(_, c)| c == ',')
        .map_or(payload, |(idx, _)| &payload[idx + 1..])
}

/// Generates a fresh object key from a random v4 UUID
#[must_use]
pub fn generate_key() -> String {
    format!("{KEY_PREFIX}{}{KEY_EXTENSION}", Uuid::new_v4().simple())
}

/// Writes validated bytes under a new key and presigns a download URL for it.
///
/// # Errors
///
/// Returns `UploadError::UploadFailed` if the write or the presign call fails.
/// The object is not removed when only presigning fails.
pub async fn store_image(
    bytes: Vec<u8>,
    settings: &Settings,
    store: &dyn ObjectStore,
) -> Result<UploadResult, UploadError> {
    let key = generate_key();
    let bucket = settings.photos_bucket();

    store
        .put_object(bucket, &key, bytes, JPEG_CONTENT_TYPE)
        .await
        .map_err(|e| UploadError::upload_failed("Failed to upload image", e))?;

    let url = store
        .presign_get(bucket, &key, settings.presigned_url_expiry_secs())
        .await
        .map_err(|e| UploadError::upload_failed("Could not generate download URL", e))?;

    Ok(UploadResult { key, url })
}

/// Runs the full pipeline for one payload
///
/// # Errors
///
/// Returns the first `UploadError` hit by [`decode_image`] or [`store_image`]
pub async fn upload(
    payload: &str,
    settings: &Settings,
    store: &dyn ObjectStore,
) -> Result<UploadResult, UploadError> {
    let bytes = decode_image(payload, settings.max_image_bytes())?;
    store_image(bytes, settings, store).await
}
