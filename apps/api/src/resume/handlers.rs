//! Axum route handlers for resume upload and match analysis.

use axum::extract::Multipart;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{MatchReport, Section};
use crate::parser;
use crate::tailoring::analysis;

/// Upload size cap; larger payloads are a user-correctable client error.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub sections: Vec<Section>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_content: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: MatchReport,
}

/// POST /api/v1/resume/upload
///
/// Multipart upload of a `.tex` file; responds with the parsed sections.
/// Zero parsed sections is not an error — the response just carries an
/// empty list.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.ends_with(".tex") {
            return Err(AppError::Validation(
                "Only .tex files are supported".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(
                "File size must be less than 10MB".to_string(),
            ));
        }

        let latex_content = String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Validation("file must be UTF-8 encoded LaTeX".to_string()))?;

        let sections = parser::parse_latex_resume(&latex_content);
        info!("parsed {} sections from {filename}", sections.len());

        return Ok(Json(UploadResponse {
            success: true,
            sections,
            message: "Resume parsed successfully".to_string(),
        }));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// POST /api/v1/resume/analyze
///
/// Keyword-coverage analysis of a resume against a job description.
pub async fn handle_analyze(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analysis = analysis::analyze_match(&request.resume_content, &request.job_description);
    Ok(Json(AnalyzeResponse {
        success: true,
        analysis,
    }))
}
