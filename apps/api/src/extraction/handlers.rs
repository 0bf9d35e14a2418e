//! Axum route handlers for resume extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::extraction::{extract_resume, parse_resume};
use crate::models::resume::ResumeDocument;
use crate::state::AppState;

/// Multipart field carrying the PDF.
const RESUME_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub text: String,
}

/// POST /api/v1/resumes/upload
///
/// Decodes an uploaded PDF and returns the extracted summary and sections.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeDocument>, AppError> {
    let mut pdf: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(RESUME_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            pdf = Some(data);
        }
    }

    let pdf = pdf.ok_or_else(|| {
        AppError::Validation(format!("Missing multipart field '{RESUME_FIELD}'"))
    })?;

    // PDF decoding is CPU-bound; keep it off the async workers.
    let source = state.text_source.clone();
    let rules = state.section_rules.clone();
    let document = tokio::task::spawn_blocking(move || {
        extract_resume(&pdf, source.as_ref(), rules.as_slice())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))??;

    Ok(Json(document))
}

/// POST /api/v1/resumes/parse
///
/// Runs section extraction on text that is already decoded.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let document = parse_resume(&request.text, &state.section_rules)?;
    Ok(Json(document))
}
