//! Photobooth backend: accepts base64 JPEG uploads, stores them in S3 and
//! hands back a presigned download URL.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Object store abstraction and its S3 implementation
pub mod media_storage;

/// HTTP routes
pub mod routes;

/// HTTP server
pub mod server;

/// Configuration, errors and extractors shared by the HTTP layer
pub mod types;

/// Decode, store and sign pipeline
pub mod upload;
