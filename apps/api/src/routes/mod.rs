pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    let extract_text =
        post(handlers::handle_extract_text).layer(DefaultBodyLimit::max(max_upload_bytes));

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/analyze-resume/", post(handlers::handle_analyze_resume))
        .route("/analyze-resume", post(handlers::handle_analyze_resume))
        .route("/analyze-topics/", post(handlers::handle_analyze_topics))
        .route("/analyze-topics", post(handlers::handle_analyze_topics))
        .route("/extract-text/", extract_text.clone())
        .route("/extract-text", extract_text)
        .with_state(state)
}

/// Browser access policy. A `*` entry opens the API to any origin without credentials;
/// otherwise only the listed origins are allowed, with credentials and mirrored
/// methods/headers.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    if allowed_origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::permissive());
    }

    let origins = allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
