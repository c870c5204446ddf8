//! Resume-vs-JD keyword match analysis.

use std::collections::HashSet;

use crate::models::resume::MatchReport;
use crate::parser;

/// Compares the resume's extracted keywords against the job description's
/// skill terms and reports coverage. Pure function, no store access.
pub fn analyze_match(resume: &str, job_description: &str) -> MatchReport {
    let sections = parser::parse_latex_resume(resume);
    let resume_keywords: HashSet<String> = sections
        .iter()
        .flat_map(|section| section.keywords.iter())
        .map(|keyword| keyword.to_lowercase())
        .collect();

    let job_keywords = parser::extract_job_keywords(job_description);

    let mut matching_keywords: Vec<String> = job_keywords
        .iter()
        .filter(|keyword| resume_keywords.contains(*keyword))
        .cloned()
        .collect();
    matching_keywords.sort();

    let missing_keywords: Vec<String> = job_keywords
        .iter()
        .filter(|keyword| !resume_keywords.contains(*keyword))
        .cloned()
        .collect();

    let match_percentage = if job_keywords.is_empty() {
        0.0
    } else {
        matching_keywords.len() as f32 / job_keywords.len() as f32 * 100.0
    };

    let suggestions = improvement_suggestions(
        matching_keywords.len(),
        job_keywords.len(),
        &missing_keywords,
    );

    MatchReport {
        match_percentage,
        matching_keywords,
        missing_keywords,
        suggestions,
    }
}

fn improvement_suggestions(
    match_count: usize,
    job_keyword_count: usize,
    missing: &[String],
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !missing.is_empty() {
        let preview: Vec<&str> = missing.iter().take(5).map(String::as_str).collect();
        suggestions.push(format!(
            "Add these keywords to your resume: {}",
            preview.join(", ")
        ));
    }

    if (match_count as f32) < job_keyword_count as f32 * 0.5 {
        suggestions.push("Consider adding more relevant experience or skills".to_string());
    }

    if match_count as f32 > job_keyword_count as f32 * 0.8 {
        suggestions.push("Good keyword match! Focus on quantifying achievements".to_string());
    }

    suggestions
}
