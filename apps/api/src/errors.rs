use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::resume::SectionId;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Remote generation failures are not represented here: they are turned into
/// a failure string inside the generator and returned as content.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not extract text from PDF. Please try a different file.")]
    ExtractionFailure,

    #[error("{0} experience not found in resume")]
    SectionNotFound(SectionId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::ExtractionFailure => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILURE",
                self.to_string(),
            ),
            AppError::SectionNotFound(_) => {
                (StatusCode::NOT_FOUND, "SECTION_NOT_FOUND", self.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_not_found_message_uses_display_name() {
        let err = AppError::SectionNotFound(SectionId::Route);
        assert_eq!(err.to_string(), "Route Mobile experience not found in resume");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::ExtractionFailure.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::SectionNotFound(SectionId::Ipsos).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
