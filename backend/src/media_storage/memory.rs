//! In-memory object store used by tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{ObjectStore, StoreError, StoreResult};

/// A stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Object bytes
    pub body: Vec<u8>,
    /// Content type the object was tagged with
    pub content_type: String,
}

/// [`ObjectStore`] that keeps objects in a map and can be told to fail.
///
/// Issued URLs mimic S3 query-string auth, carrying `X-Amz-Date` and
/// `X-Amz-Expires` so callers can check the validity window.
#[derive(Debug)]
pub struct InMemoryObjectStore {
    region: String,
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    put_calls: AtomicUsize,
    presign_calls: AtomicUsize,
    fail_puts: AtomicBool,
    fail_presign: AtomicBool,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new("us-east-1")
    }
}

impl InMemoryObjectStore {
    /// Creates an empty, healthy store for `region`
    #[must_use]
    pub fn new(region: &str) -> Self {
        Self {
            region: region.to_string(),
            objects: Mutex::new(HashMap::new()),
            put_calls: AtomicUsize::new(0),
            presign_calls: AtomicUsize::new(0),
            fail_puts: AtomicBool::new(false),
            fail_presign: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent write fail
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent presign request fail
    pub fn fail_presign(&self, fail: bool) {
        self.fail_presign.store(fail, Ordering::SeqCst);
    }

    /// Number of write attempts, successful or not
    #[must_use]
    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    /// Number of presign attempts, successful or not
    #[must_use]
    pub fn presign_calls(&self) -> usize {
        self.presign_calls.load(Ordering::SeqCst)
    }

    /// Number of objects currently stored
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no object has been stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the object under `bucket`/`key`, if any
    #[must_use]
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), StoredObject>> {
        // A poisoned map only means another test thread panicked mid-insert
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> StoreResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StoreError::S3Error("AccessDenied: injected failure".to_string()));
        }

        self.lock().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in_secs: u64,
    ) -> StoreResult<String> {
        self.presign_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(StoreError::PresignError("injected failure".to_string()));
        }

        let signed_at = Utc::now().format("%Y%m%dT%H%M%SZ");
        Ok(format!(
            "https://{bucket}.s3.{region}.amazonaws.com/{key}?X-Amz-Date={signed_at}&X-Amz-Expires={expires_in_secs}",
            region = self.region,
        ))
    }
}
