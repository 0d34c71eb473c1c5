use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    media_storage::ObjectStore,
    types::{AppError, JsonBody, Settings},
    upload::{self, UploadResult},
};

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Base64 JPEG, optionally as a `data:` URI
    #[serde(default)]
    pub image: Option<String>,
}

#[instrument(skip_all)]
pub async fn upload_photo(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(store): Extension<Arc<dyn ObjectStore>>,
    JsonBody(request): JsonBody<UploadRequest>,
) -> Result<Json<UploadResult>, AppError> {
    let image = request
        .image
        .filter(|image| !image.is_empty())
        .ok_or_else(AppError::missing_image)?;

    let result = upload::upload(&image, &settings, store.as_ref()).await?;

    info!(key = %result.key, encoded_len = image.len(), "Uploaded photo");

    Ok(Json(result))
}

/// CORS preflight; headers are added by the router layers
#[allow(clippy::unused_async)]
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[allow(clippy::unused_async)]
pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}
