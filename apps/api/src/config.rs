use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::llm_client::GEMINI_API_URL;
use crate::topics::{CorpusStrategy, PipelineConfig};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub topics: PipelineConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PipelineConfig::default();

        let topics = PipelineConfig {
            chunk_size: positive(&lookup, "TOPIC_CHUNK_SIZE", defaults.chunk_size)?,
            max_features: positive(&lookup, "TOPIC_MAX_FEATURES", defaults.max_features)?,
            min_tokens: optional(&lookup, "TOPIC_MIN_TOKENS", defaults.min_tokens)?,
            corpus: match lookup("TOPIC_CORPUS") {
                Some(raw) => raw
                    .parse::<CorpusStrategy>()
                    .map_err(anyhow::Error::msg)
                    .context("TOPIC_CORPUS must be 'chunked' or 'document'")?,
                None => defaults.corpus,
            },
            max_iterations: positive(&lookup, "TOPIC_MAX_ITER", defaults.max_iterations)?,
            seed: optional(&lookup, "TOPIC_SEED", defaults.seed)?,
        };

        let cors_allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();
        if cors_allowed_origins.is_empty() {
            bail!("Environment variable 'CORS_ALLOWED_ORIGINS' must list at least one origin");
        }

        Ok(Config {
            google_api_key: require(&lookup, "GOOGLE_API_KEY")?,
            gemini_api_url: lookup("GEMINI_API_URL")
                .unwrap_or_else(|| GEMINI_API_URL.to_string()),
            port: optional(&lookup, "PORT", DEFAULT_PORT)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            cors_allowed_origins,
            max_upload_bytes: positive(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            topics,
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let value = optional(lookup, key, default)?;
    if value == 0 {
        bail!("Environment variable '{key}' must be greater than zero");
    }
    Ok(value)
}
