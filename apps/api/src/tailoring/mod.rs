//! The tailoring pipeline: parse → store → retrieve → compose → generate →
//! sanitize.

pub mod analysis;
pub mod handlers;
pub mod prompts;
pub mod sanitize;

use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::resolve_provider_model;
use crate::parser;
use crate::state::AppState;

/// Runs the full tailoring pipeline and returns the sanitized rewrite.
///
/// Store writes and retrieval are best-effort: their failures degrade to
/// missing context in the prompt. A generation failure is the only error
/// surfaced to the caller.
pub async fn tailor_resume(
    state: &AppState,
    resume: &str,
    job_description: &str,
    model: Option<&str>,
) -> Result<String, AppError> {
    // Fresh ids per request; fragment ids derive from these.
    let resume_id = Uuid::new_v4().to_string();
    let job_id = Uuid::new_v4().to_string();

    let sections = parser::parse_latex_resume(resume);
    state.store.store_resume_sections(&resume_id, &sections).await;
    state.store.store_job_description(&job_id, job_description).await;

    let relevant_sections = state
        .retriever
        .find_relevant(job_description, &resume_id)
        .await;
    let job_keywords = parser::extract_job_keywords(job_description);

    let prompt = prompts::compose_tailoring_prompt(
        resume,
        job_description,
        &relevant_sections,
        &job_keywords,
    );

    let model_id = resolve_provider_model(model.unwrap_or_default());
    let raw = state
        .llm
        .complete(&prompt, prompts::TAILOR_SYSTEM, &model_id)
        .await
        .map_err(|e| AppError::Llm(format!("resume tailoring failed: {e}")))?;

    Ok(sanitize::sanitize_model_output(raw.trim()))
}
