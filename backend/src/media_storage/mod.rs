//! Object storage for uploaded photos
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod memory;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, primitives::ByteStream, Client as S3Client};

pub use error::{StoreError, StoreResult};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{InMemoryObjectStore, StoredObject};

/// Narrow capability over a bucket-style object store.
///
/// The upload pipeline only ever writes an object and asks for a time-limited
/// read URL for it, so this is all an implementation has to provide.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `body` to `bucket` under `key`, tagged with `content_type`
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()>;

    /// Returns a presigned GET URL for `key` that expires after `expires_in_secs`
    async fn presign_get(&self, bucket: &str, key: &str, expires_in_secs: u64)
        -> StoreResult<String>;
}

/// [`ObjectStore`] backed by Amazon S3 (or anything speaking its API)
#[derive(Clone)]
pub struct S3ObjectStore {
    s3_client: Arc<S3Client>,
}

impl S3ObjectStore {
    /// Creates a new store over a pre-configured S3 client
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()> {
        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await?;

        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StoreError::ConfigError` if the SDK rejects the expiry (it caps presigning at one week)
    /// Returns `StoreError::PresignError` if signing the request fails
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in_secs: u64,
    ) -> StoreResult<String> {
        let presigned_config = PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))
            .map_err(|e| StoreError::ConfigError(format!("Failed to create presigning config: {e}")))?;

        let presigned_request = self
            .s3_client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigned_config)
            .await
            .map_err(|e| StoreError::PresignError(format!("Failed to generate presigned URL: {e}")))?;

        Ok(presigned_request.uri().to_string())
    }
}
