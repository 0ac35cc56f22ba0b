//! Local topic modeling over resume text.
//!
//! raw text -> normalizer -> chunker -> vectorizer -> LDA -> job-role label list.
//! Every run builds its own vectorizer and model; only `LanguageResources` is shared, read-only.

pub mod chunker;
pub mod lda;
pub mod lemmatizer;
pub mod normalizer;
pub mod resources;
pub mod vectorizer;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::topics::chunker::{chunk, DEFAULT_CHUNK_SIZE};
use crate::topics::lda::{infer_topics, LdaParams};
use crate::topics::normalizer::Normalizer;
use crate::topics::resources::LanguageResources;
use crate::topics::vectorizer::{vectorize, DEFAULT_MAX_FEATURES};

pub const NOT_ENOUGH_TEXT: &str = "Not enough text for analysis";
pub const NO_SIGNIFICANT_TERMS: &str = "No significant terms found in the resume";
pub const NO_JOB_ROLES: &str = "No job roles detected";

/// Minimum normalized token count before topic modeling is attempted.
pub const DEFAULT_MIN_TOKENS: usize = 10;

/// The endpoint always models a single topic.
const NUM_TOPICS: usize = 1;

#[derive(Debug, Error)]
pub enum TopicError {
    #[error("Resume text cannot be empty.")]
    EmptyInput,

    #[error("chunk size must be positive, got {0}")]
    InvalidChunkSize(usize),

    #[error("max features must be positive, got {0}")]
    InvalidMaxFeatures(usize),

    #[error("topic count must be positive, got {0}")]
    InvalidTopicCount(usize),

    #[error("cannot fit a topic model on a matrix with no terms")]
    EmptyMatrix,

    #[error("failed to compile normalizer pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// How normalized tokens become vectorizer documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusStrategy {
    /// Fixed-size word windows, one document per chunk.
    #[default]
    Chunked,
    /// The whole token stream as one document.
    Document,
}

impl std::str::FromStr for CorpusStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chunked" => Ok(Self::Chunked),
            "document" | "single" | "single_document" => Ok(Self::Document),
            other => Err(format!("unknown corpus strategy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub chunk_size: usize,
    pub max_features: usize,
    pub min_tokens: usize,
    pub corpus: CorpusStrategy,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let lda = LdaParams::default();
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_features: DEFAULT_MAX_FEATURES,
            min_tokens: DEFAULT_MIN_TOKENS,
            corpus: CorpusStrategy::default(),
            max_iterations: lda.max_iterations,
            seed: lda.seed,
        }
    }
}

impl PipelineConfig {
    fn lda_params(&self) -> LdaParams {
        LdaParams {
            num_topics: NUM_TOPICS,
            max_iterations: self.max_iterations,
            seed: self.seed,
        }
    }
}

/// Result of one topic analysis. Degenerate inputs are outcomes, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TopicOutcome {
    InsufficientContent { tokens: usize },
    EmptyVocabulary,
    NoRolesDetected,
    Roles(Vec<String>),
}

impl TopicOutcome {
    /// The `job_roles` list returned to clients, sentinels included.
    pub fn into_job_roles(self) -> Vec<String> {
        match self {
            TopicOutcome::InsufficientContent { .. } => vec![NOT_ENOUGH_TEXT.to_string()],
            TopicOutcome::EmptyVocabulary => vec![NO_SIGNIFICANT_TERMS.to_string()],
            TopicOutcome::NoRolesDetected => vec![NO_JOB_ROLES.to_string()],
            TopicOutcome::Roles(roles) => roles,
        }
    }
}

/// Immutable, shareable pipeline built once at startup.
pub struct TopicPipeline {
    normalizer: Normalizer,
    config: PipelineConfig,
}

impl TopicPipeline {
    pub fn new(
        resources: Arc<LanguageResources>,
        config: PipelineConfig,
    ) -> Result<Self, TopicError> {
        if config.chunk_size == 0 {
            return Err(TopicError::InvalidChunkSize(config.chunk_size));
        }
        if config.max_features == 0 {
            return Err(TopicError::InvalidMaxFeatures(config.max_features));
        }
        Ok(Self {
            normalizer: Normalizer::new(resources)?,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// End-to-end topic analysis for one resume.
    pub fn analyze(&self, raw_text: &str) -> Result<TopicOutcome, TopicError> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(TopicError::EmptyInput);
        }

        let tokens = self.normalizer.normalize(text);
        if tokens.len() < self.config.min_tokens {
            debug!(tokens = tokens.len(), "Too few tokens for topic modeling");
            return Ok(TopicOutcome::InsufficientContent {
                tokens: tokens.len(),
            });
        }

        let documents = match self.config.corpus {
            CorpusStrategy::Chunked => chunk(&tokens, self.config.chunk_size)?,
            CorpusStrategy::Document => vec![tokens.join(" ")],
        };

        let matrix = vectorize(&documents, self.config.max_features)?;
        if matrix.is_degenerate() {
            debug!(documents = documents.len(), "Vectorizer kept no terms");
            return Ok(TopicOutcome::EmptyVocabulary);
        }

        let roles = infer_topics(&matrix, &self.config.lda_params())?;
        info!(
            tokens = tokens.len(),
            documents = matrix.n_rows(),
            terms = matrix.n_cols(),
            "Topic analysis complete"
        );

        if roles.is_empty() {
            return Ok(TopicOutcome::NoRolesDetected);
        }
        Ok(TopicOutcome::Roles(roles))
    }
}
