pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers as resume_handlers;
use crate::resume::handlers::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use crate::tailoring::handlers as tailor_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resume/upload",
            post(resume_handlers::handle_upload),
        )
        .route(
            "/api/v1/resume/analyze",
            post(resume_handlers::handle_analyze),
        )
        // Tailor API
        .route("/api/v1/tailor", post(tailor_handlers::handle_tailor))
        .route(
            "/api/v1/tailor/compile",
            post(tailor_handlers::handle_compile),
        )
        // Uploads are validated at 10MB; the transport limit must not
        // reject them first.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024))
        .with_state(state)
}
