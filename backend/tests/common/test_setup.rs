use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use photobooth_backend::{
    media_storage::{InMemoryObjectStore, ObjectStore},
    routes,
    types::Settings,
};
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "test-photos";
pub const TEST_ORIGIN: &str = "https://booth.example.com";

/// Setup tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Router wired to an in-memory object store
pub struct TestContext {
    pub router: Router,
    pub settings: Arc<Settings>,
    pub store: Arc<InMemoryObjectStore>,
}

impl TestContext {
    /// Creates a context with the given size limit (defaults to 10 MiB)
    pub fn new(max_image_bytes: Option<usize>) -> Self {
        setup_test_env();

        let settings = Arc::new(
            Settings::new(
                TEST_BUCKET,
                "us-east-1",
                3600,
                TEST_ORIGIN,
                max_image_bytes.unwrap_or(10_485_760),
            )
            .expect("valid test settings"),
        );
        let store = Arc::new(InMemoryObjectStore::new("us-east-1"));

        let router = routes::handler(settings.clone(), store.clone() as Arc<dyn ObjectStore>)
            .expect("router builds");

        Self {
            router,
            settings,
            store,
        }
    }

    pub async fn send_request(
        &self,
        method: &str,
        route: &str,
        body: Body,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method(method)
            .header("Content-Type", "application/json")
            .body(body)?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_request("POST", route, Body::from(payload.to_string()))
            .await
    }
}
