//! Presigning is computed locally by the SDK, so these run without S3 or `LocalStack`

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::Client as S3Client;
use photobooth_backend::media_storage::{ObjectStore, S3ObjectStore, StoreError};

const BUCKET: &str = "test-photos";

fn store(force_path_style: bool) -> S3ObjectStore {
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "static"))
        .force_path_style(force_path_style)
        .build();

    S3ObjectStore::new(Arc::new(S3Client::from_conf(config)))
}

#[tokio::test]
async fn test_presign_get_url() {
    let url = store(false)
        .presign_get(BUCKET, "photos/0123456789abcdef0123456789abcdef.jpg", 3600)
        .await
        .expect("presign succeeds");

    let parsed = url::Url::parse(&url).unwrap();
    assert!(parsed.host_str().unwrap().starts_with(BUCKET));
    assert_eq!(
        parsed.path(),
        "/photos/0123456789abcdef0123456789abcdef.jpg"
    );

    let expires = parsed
        .query_pairs()
        .find(|(k, _)| k == "X-Amz-Expires")
        .map(|(_, v)| v.into_owned());
    assert_eq!(expires.as_deref(), Some("3600"));
    assert!(url.contains("X-Amz-Signature="));
}

#[tokio::test]
async fn test_presign_get_url_path_style() {
    let url = store(true)
        .presign_get(BUCKET, "photos/abc.jpg", 60)
        .await
        .expect("presign succeeds");

    let parsed = url::Url::parse(&url).unwrap();
    assert_eq!(parsed.path(), format!("/{BUCKET}/photos/abc.jpg"));
}

#[tokio::test]
async fn test_presign_rejects_expiry_over_one_week() {
    let err = store(false)
        .presign_get(BUCKET, "photos/abc.jpg", 8 * 24 * 60 * 60)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::ConfigError(_)), "got {err:?}");
}
