use axum::response::Response;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http_body_util::BodyExt;

/// Builds a minimal JFIF-looking buffer of `size` bytes (SOI ... EOI).
///
/// Only the SOI marker matters to the service; the rest is padding.
pub fn make_jpeg(size: usize) -> Vec<u8> {
    let mut body = vec![
        0xFF, 0xD8, 0xFF, 0xE0, // SOI + APP0
        0x00, 0x10, // APP0 length
        b'J', b'F', b'I', b'F', 0x00, // identifier
        0x01, 0x01, // version
        0x00, // units
        0x00, 0x01, 0x00, 0x01, // density
        0x00, 0x00, // thumbnail
    ];
    if body.len() + 2 < size {
        body.resize(size - 2, 0);
    }
    body.extend_from_slice(&[0xFF, 0xD9]);
    body
}

/// Base64 of [`make_jpeg`]
pub fn make_jpeg_base64(size: usize) -> String {
    STANDARD.encode(make_jpeg(size))
}

/// Collect the raw response body
pub async fn response_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response_bytes(response).await;
    serde_json::from_slice(&body).unwrap()
}

/// Whether `key` looks like `photos/<32 lowercase hex>.jpg`
pub fn is_photo_key(key: &str) -> bool {
    key.strip_prefix("photos/")
        .and_then(|k| k.strip_suffix(".jpg"))
        .is_some_and(|hex| {
            hex.len() == 32 && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        })
}
