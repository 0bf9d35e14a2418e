//! Resume decoding and section extraction.
//!
//! Flow: bytes → `DocumentTextSource` → plain text → summary + section passes
//! → `ResumeDocument`.

pub mod handlers;
pub mod pdf;
pub mod sections;
pub mod summary;

use tracing::info;

use crate::errors::AppError;
use crate::extraction::pdf::DocumentTextSource;
use crate::extraction::sections::{extract_sections, SectionRule};
use crate::extraction::summary::extract_summary;
use crate::models::resume::{ResumeDocument, SectionId};

/// Builds a `ResumeDocument` from already-decoded text.
///
/// Fails with `ExtractionFailure` when there is no text to work on.
pub fn parse_resume(text: &str, rules: &[SectionRule]) -> Result<ResumeDocument, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::ExtractionFailure);
    }

    let summary = extract_summary(text);
    let mut sections = extract_sections(text, rules);
    sections.insert(SectionId::Summary, summary.clone());

    let document = ResumeDocument {
        raw_text: text.to_string(),
        summary,
        sections,
    };

    info!(
        "Resume parsed: summary={} chars, {}",
        document.summary.len(),
        SectionId::COMPANIES
            .iter()
            .map(|id| format!("{}={} chars", id, document.section(*id).len()))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(document)
}

/// Decodes document bytes and parses the result.
pub fn extract_resume(
    bytes: &[u8],
    source: &dyn DocumentTextSource,
    rules: &[SectionRule],
) -> Result<ResumeDocument, AppError> {
    let text = source.extract_text(bytes);
    parse_resume(&text, rules)
}
