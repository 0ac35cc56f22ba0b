//! Axum route handlers for the resume analysis API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::analysis::pdf;
use crate::analysis::prompts::build_resume_prompt;
use crate::errors::AppError;
use crate::llm_client::candidate_text;
use crate::state::AppState;

const EMPTY_RESUME: &str = "Resume text cannot be empty.";
const UPLOAD_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    #[serde(rename = "resumeText")]
    pub resume_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicsResponse {
    pub job_roles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractTextResponse {
    #[serde(rename = "resumeText")]
    pub resume_text: String,
    pub file_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze-resume/
///
/// Sends the resume through the structured-extraction prompt and returns the
/// generator's raw JSON response.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<Value>, AppError> {
    info!(
        chars = request.resume_text.len(),
        "Received resume text for analysis"
    );

    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_RESUME.to_string()));
    }

    let prompt = build_resume_prompt(&request.resume_text);
    let response = state.generator.generate(&prompt).await?;

    debug!(
        analysis_chars = ?candidate_text(&response).map(str::len),
        "Resume analysis received"
    );

    Ok(Json(response))
}

/// POST /analyze-topics/
///
/// Runs local topic modeling and returns likely job-role keywords.
/// Degenerate inputs return a single sentinel string rather than an error.
pub async fn handle_analyze_topics(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<TopicsResponse>, AppError> {
    info!(
        chars = request.resume_text.len(),
        "Received resume text for topic modeling"
    );

    let pipeline = Arc::clone(&state.topics);
    let outcome = tokio::task::spawn_blocking(move || pipeline.analyze(&request.resume_text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Topic analysis task failed: {e}")))??;

    Ok(Json(TopicsResponse {
        job_roles: outcome.into_job_roles(),
    }))
}

/// POST /extract-text/
///
/// Accepts a multipart PDF upload (field `resume`, or the first file field) and
/// returns its text layer in the same shape the analysis endpoints consume.
pub async fn handle_extract_text(
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let file_name = field.file_name().map(str::to_string);
        if field.name() != Some(UPLOAD_FIELD) && file_name.is_none() {
            continue;
        }

        if let Some(name) = &file_name {
            if !name.to_lowercase().ends_with(".pdf") {
                return Err(AppError::Validation(
                    "Only PDF files are allowed".to_string(),
                ));
            }
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid file: {e}")))?;
        info!(bytes = bytes.len(), file = ?file_name, "Extracting text from PDF");

        let text = tokio::task::spawn_blocking(move || pdf::extract_text(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))??;

        return Ok(Json(ExtractTextResponse {
            resume_text: text,
            file_name,
        }));
    }

    Err(AppError::Validation(format!(
        "No file found in upload; expected a '{UPLOAD_FIELD}' field"
    )))
}
