mod analysis;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod topics;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::topics::resources::LanguageResources;
use crate::topics::TopicPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Load language resources once; shared read-only by every topic analysis
    let resources = Arc::new(LanguageResources::english());
    info!(
        "Language resources loaded ({} excluded terms)",
        resources.excluded_count()
    );

    let pipeline = TopicPipeline::new(resources, config.topics.clone())
        .context("Invalid topic pipeline configuration")?;
    info!(
        "Topic pipeline ready: {:?}",
        pipeline.config()
    );

    // Initialize LLM client
    let generator = GeminiClient::new(config.google_api_key.clone(), config.gemini_api_url.clone())
        .context("Failed to build HTTP client")?;
    info!("LLM client initialized (endpoint: {})", config.gemini_api_url);

    let state = AppState {
        generator: Arc::new(generator),
        topics: Arc::new(pipeline),
    };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
