//! Axum route handlers for the Generation API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::keywords::parse_job_description;
use crate::models::resume::{GeneratedContent, GenerationMode, SectionId};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub current_summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub mode: GenerationMode,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceRequest {
    pub section: SectionId,
    #[serde(default)]
    pub experience_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub mode: GenerationMode,
}

#[derive(Debug, Serialize)]
pub struct ExperienceResponse {
    pub section: SectionId,
    pub text: String,
}

/// The parts of an extracted resume that generation needs.
#[derive(Debug, Default, Deserialize)]
pub struct ResumeSections {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub sections: BTreeMap<SectionId, String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateAllRequest {
    pub resume: ResumeSections,
    pub jd_text: String,
    #[serde(default)]
    pub mode: GenerationMode,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/keywords
///
/// Returns the vocabulary keywords found in a job description.
pub async fn handle_keywords(
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let jd = parse_job_description(&request.jd_text);
    info!("Matched {} keywords in JD", jd.keywords.len());
    Ok(Json(KeywordsResponse {
        keywords: jd.keywords,
    }))
}

/// POST /api/v1/generate/summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = state
        .generator
        .generate_summary(request.mode, &request.current_summary, &request.keywords)
        .await;
    Ok(Json(SummaryResponse { summary }))
}

/// POST /api/v1/generate/experience
///
/// 404 when the section has no extracted text; generate only what the
/// resume actually contains.
pub async fn handle_generate_experience(
    State(state): State<AppState>,
    Json(request): Json<ExperienceRequest>,
) -> Result<Json<ExperienceResponse>, AppError> {
    let text = state
        .generator
        .generate_experience(
            request.mode,
            request.section,
            &request.experience_text,
            &request.keywords,
        )
        .await?;
    Ok(Json(ExperienceResponse {
        section: request.section,
        text,
    }))
}

/// POST /api/v1/generate/all
///
/// Derives keywords from the JD, then generates the summary and every
/// company section present in the resume.
pub async fn handle_generate_all(
    State(state): State<AppState>,
    Json(request): Json<GenerateAllRequest>,
) -> Result<Json<GeneratedContent>, AppError> {
    let jd = parse_job_description(&request.jd_text);
    let content = state
        .generator
        .generate_all(
            request.mode,
            &request.resume.summary,
            &request.resume.sections,
            jd.keywords,
        )
        .await;

    info!(
        "Generated content {} ({} experience sections)",
        content.id,
        content.experiences.len()
    );
    Ok(Json(content))
}
