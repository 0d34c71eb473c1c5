mod health;
mod photos;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer};

use crate::{
    media_storage::ObjectStore,
    types::{error::handle_panic, AppError, Settings, SettingsError},
};

/// Path photos are uploaded to
pub const PHOTOS_ROUTE: &str = "/v1/photos";

/// Room for the JSON envelope and a `data:` URI prefix around the base64 text
const BODY_HEADROOM_BYTES: usize = 64 * 1024;

/// Largest request body that can still carry an image of `max_image_bytes` decoded bytes
#[must_use]
pub const fn max_body_bytes(max_image_bytes: usize) -> usize {
    max_image_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(BODY_HEADROOM_BYTES)
}

/// Creates the router with all handler routes and their dependencies.
///
/// CORS headers are set on every response, errors and preflights included.
///
/// # Errors
///
/// Returns `SettingsError::InvalidOrigin` if the allowed origin is not a valid header value
pub fn handler(
    settings: Arc<Settings>,
    store: Arc<dyn ObjectStore>,
) -> Result<Router, SettingsError> {
    let allowed_origin = HeaderValue::from_str(settings.allowed_origin())
        .map_err(|_| SettingsError::InvalidOrigin(settings.allowed_origin().to_string()))?;

    let body_limit = max_body_bytes(settings.max_image_bytes());

    let router = Router::new()
        .route(
            PHOTOS_ROUTE,
            post(photos::upload_photo)
                .options(photos::preflight)
                .fallback(photos::method_not_allowed),
        )
        .route("/health", get(health::handler))
        .fallback(|| async { AppError::not_found() })
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(settings))
        .layer(Extension(store))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            allowed_origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    Ok(router)
}
