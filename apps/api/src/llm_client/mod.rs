//! LLM client: the single point of entry for all generative-AI calls.
//!
//! Handlers depend on the `TextGenerator` trait, never on `GeminiClient` directly.
//!
//! One attempt per call: failures are surfaced to the caller with the upstream status
//! and body, never retried.
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const LOG_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {detail}")]
    Api { status: u16, detail: Value },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Narrow seam over the remote text-completion service.
/// Returns the service's raw JSON response.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Value, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: String, endpoint: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            endpoint,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Value, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| {
                warn!("Gemini request failed: {e}");
                LlmError::Http(e)
            })?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            status = status.as_u16(),
            preview = preview(&body),
            "Gemini response received"
        );

        if !status.is_success() {
            warn!("Gemini API returned {status}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                detail: parse_detail(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Extracts `candidates[0].content.parts[0].text` from a Gemini response.
pub fn candidate_text(response: &Value) -> Option<&str> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

/// Upstream error bodies are JSON in the normal case; fall back to the raw text.
fn parse_detail(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
