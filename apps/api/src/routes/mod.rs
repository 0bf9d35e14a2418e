pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::generation::handlers as generation;
use crate::state::AppState;

/// Upload cap for resume PDFs.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume extraction
        .route(
            "/api/v1/resumes/upload",
            post(extraction::handle_upload_resume),
        )
        .route("/api/v1/resumes/parse", post(extraction::handle_parse_resume))
        // Job description keywords
        .route("/api/v1/jobs/keywords", post(generation::handle_keywords))
        // Generation
        .route(
            "/api/v1/generate/summary",
            post(generation::handle_generate_summary),
        )
        .route(
            "/api/v1/generate/experience",
            post(generation::handle_generate_experience),
        )
        .route("/api/v1/generate/all", post(generation::handle_generate_all))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
