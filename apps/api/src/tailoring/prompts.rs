//! Prompt constants and composition for the tailoring rewrite.

use crate::models::resume::RetrievalResult;

/// System instruction for the rewrite call. Keeps the model on LaTeX output
/// and bans reasoning artifacts; the sanitizer cleans up whatever leaks
/// through anyway.
pub const TAILOR_SYSTEM: &str = "You are a professional resume writer specializing in LaTeX \
    formatting. Always preserve LaTeX syntax and formatting. Output only the final LaTeX \
    content of the resume without any analysis, commentary, chain-of-thought, or \
    <think>...</think> blocks. Do not use code fences. If you need to include any notes, \
    put them after \\end{document}.";

/// How many retrieved sections are surfaced in the prompt.
const MAX_CONTEXT_SECTIONS: usize = 3;
/// Preview length per surfaced section.
const SECTION_PREVIEW_CHARS: usize = 200;

/// Assembles the single instruction-plus-context prompt for the rewrite.
/// Pure formatting: empty inputs simply render as empty segments.
pub fn compose_tailoring_prompt(
    resume: &str,
    job_description: &str,
    relevant_sections: &[RetrievalResult],
    job_keywords: &[String],
) -> String {
    let relevant_context = relevant_sections
        .iter()
        .take(MAX_CONTEXT_SECTIONS)
        .map(|section| {
            let preview: String = section.content.chars().take(SECTION_PREVIEW_CHARS).collect();
            format!("- {}: {}...", section.section_type, preview)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nYou are a professional resume writer. Tailor the following LaTeX resume to better \
         match the job description.\n\n\
         JOB DESCRIPTION:\n{job_description}\n\n\
         KEY JOB REQUIREMENTS:\n{keywords}\n\n\
         RELEVANT RESUME SECTIONS (most important for this job):\n{relevant_context}\n\n\
         ORIGINAL RESUME:\n{resume}\n\n\
         INSTRUCTIONS:\n\
         1. Preserve all LaTeX formatting and syntax exactly\n\
         2. Enhance sections to better match the job requirements\n\
         3. Add relevant keywords naturally into the content\n\
         4. Keep the same structure and length\n\
         5. Focus on the most relevant sections identified above\n\
         6. Maintain professional tone and formatting\n\n\
         TAILORED RESUME:\n",
        keywords = job_keywords.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(section_type: &str, content: &str) -> RetrievalResult {
        RetrievalResult {
            content: content.to_string(),
            section_type: section_type.to_string(),
            similarity: 0.1,
        }
    }

    #[test]
    fn test_prompt_carries_jd_keywords_and_resume_verbatim() {
        let prompt = compose_tailoring_prompt(
            r"\section{Skills} Python",
            "Looking for a Python engineer",
            &[hit("skills", "Python things")],
            &["python".to_string(), "aws".to_string()],
        );
        assert!(prompt.contains("Looking for a Python engineer"));
        assert!(prompt.contains("python, aws"));
        assert!(prompt.contains(r"\section{Skills} Python"));
        assert!(prompt.contains("- skills: Python things..."));
    }

    #[test]
    fn test_prompt_surfaces_at_most_three_sections() {
        let hits = vec![
            hit("skills", "a"),
            hit("experience", "b"),
            hit("projects", "c"),
            hit("education", "d"),
        ];
        let prompt = compose_tailoring_prompt("resume", "jd", &hits, &[]);
        assert!(prompt.contains("- skills"));
        assert!(prompt.contains("- projects"));
        assert!(!prompt.contains("- education"));
    }

    #[test]
    fn test_section_previews_are_truncated_to_200_chars() {
        let long = "x".repeat(500);
        let prompt = compose_tailoring_prompt("resume", "jd", &[hit("skills", &long)], &[]);
        assert!(prompt.contains(&"x".repeat(200)));
        assert!(!prompt.contains(&"x".repeat(201)));
    }

    #[test]
    fn test_empty_inputs_still_render_a_prompt() {
        let prompt = compose_tailoring_prompt("", "", &[], &[]);
        assert!(prompt.contains("JOB DESCRIPTION:"));
        assert!(prompt.contains("TAILORED RESUME:"));
    }
}
