//! Axum route handlers for tailoring and PDF preview.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::compile::compile_to_pdf;
use crate::errors::AppError;
use crate::state::AppState;
use crate::tailoring::{analysis, tailor_resume};

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub resume: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub tailored_resume: String,
    pub suggestions: Vec<String>,
}

/// POST /api/v1/tailor
///
/// Runs the tailoring pipeline and bundles improvement suggestions from the
/// keyword analysis alongside the rewritten resume.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let tailored = tailor_resume(
        &state,
        &request.resume,
        &request.job_description,
        request.model.as_deref(),
    )
    .await?;

    let report = analysis::analyze_match(&request.resume, &request.job_description);

    Ok(Json(TailorResponse {
        tailored_resume: tailored,
        suggestions: report.suggestions,
    }))
}

/// POST /api/v1/tailor/compile
///
/// Accepts LaTeX (in `resume`) and returns compiled PDF bytes. Used by the
/// frontend for live preview; compilation failures surface as 422 with the
/// engine diagnostics so the UI can display them.
pub async fn handle_compile(
    State(_state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Response, AppError> {
    let pdf_bytes = compile_to_pdf(&request.resume).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Bytes::from(pdf_bytes),
    )
        .into_response())
}
