use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::topics::TopicPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Remote structured-extraction backend. `GeminiClient` in production, a stub in tests.
    pub generator: Arc<dyn TextGenerator>,
    /// Built once at startup; each request fits its own vectorizer and model.
    pub topics: Arc<TopicPipeline>,
}
