//! LaTeX structural parser — splits a raw `.tex` resume into typed sections
//! and pulls candidate keywords out of their content.
//!
//! This is regex-driven and deliberately heuristic: malformed LaTeX never
//! errors, it just yields fewer (or zero) sections.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::resume::{Section, SectionType};

/// Hardcoded vocabulary used to decide whether a capitalized run from the
/// resume looks like a technical term.
// TODO: build the vocabulary dynamically instead of hardcoding it
const TECHNICAL_TERMS: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "Java",
    "C++",
    "SQL",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "MongoDB",
    "PostgreSQL",
    "Machine Learning",
    "AI",
    "Data Science",
    "Web Development",
    "Agile",
    "Scrum",
    "DevOps",
    "CI/CD",
    "REST API",
    "GraphQL",
];

/// Lowercase skill list scanned against job descriptions.
const JOB_SKILL_TERMS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "c++",
    "sql",
    "react",
    "node.js",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "mongodb",
    "postgresql",
    "machine learning",
    "ai",
    "data science",
    "web development",
    "agile",
    "scrum",
    "devops",
    "ci/cd",
    "rest api",
    "graphql",
];

/// Max keywords reported per section.
const MAX_KEYWORDS: usize = 10;

fn section_patterns() -> &'static [(SectionType, Regex)] {
    static PATTERNS: OnceLock<Vec<(SectionType, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let named = [
            (SectionType::Education, "Education"),
            (SectionType::Experience, "Experience"),
            (SectionType::Skills, "Skills"),
            (SectionType::Projects, "Projects"),
            (SectionType::Certifications, "Certifications"),
            (SectionType::Awards, "Awards"),
            (SectionType::Publications, "Publications"),
            (SectionType::Languages, "Languages"),
            (SectionType::Interests, "Interests"),
        ];

        // The personal-info block sits between \begin{document} + \maketitle
        // and the first sectioning command.
        let mut patterns = vec![(
            SectionType::PersonalInfo,
            Regex::new(r"(?is)\\begin\{document\}.*?\\maketitle(.*?)(?:\\section|\\subsection|$)")
                .expect("valid personal_info pattern"),
        )];

        for (section_type, name) in named {
            // Whole-match capture: the section content keeps its
            // \section{...} header line.
            let pattern = format!(r"(?is)(\\section\{{{name}\}}.*?)(?:\\section|\\subsection|$)");
            patterns.push((
                section_type,
                Regex::new(&pattern).expect("valid section pattern"),
            ));
        }

        patterns
    })
}

fn document_body_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)\\begin\{document\}(.*?)\\end\{document\}")
            .expect("valid document body pattern")
    })
}

/// Parses LaTeX resume content into structured sections.
///
/// Sections come back in pattern-table order (not source order), and only
/// those with non-empty trimmed content are kept. When no known section
/// matches, the whole `\begin{document}...\end{document}` span is returned
/// as a single `general` section; when even that fails, the result is empty.
pub fn parse_latex_resume(latex_content: &str) -> Vec<Section> {
    let mut sections = Vec::new();

    for (section_type, pattern) in section_patterns() {
        if let Some(captures) = pattern.captures(latex_content) {
            let content = captures
                .get(1)
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            if !content.is_empty() {
                sections.push(Section {
                    section_type: *section_type,
                    content: content.to_string(),
                    keywords: extract_keywords(content),
                });
            }
        }
    }

    if sections.is_empty() {
        if let Some(captures) = document_body_pattern().captures(latex_content) {
            let content = captures
                .get(1)
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            if !content.is_empty() {
                sections.push(Section {
                    section_type: SectionType::General,
                    content: content.to_string(),
                    keywords: extract_keywords(content),
                });
            }
        }
    }

    sections
}

/// Extracts up to [`MAX_KEYWORDS`] likely technical keywords from LaTeX
/// content: strip commands, find capitalized word runs, keep the ones that
/// contain a known technical term (case-insensitive substring).
pub fn extract_keywords(content: &str) -> Vec<String> {
    static COMMAND_WITH_ARG: OnceLock<Regex> = OnceLock::new();
    static BARE_COMMAND: OnceLock<Regex> = OnceLock::new();
    static CAPITALIZED_RUN: OnceLock<Regex> = OnceLock::new();

    let command_with_arg = COMMAND_WITH_ARG
        .get_or_init(|| Regex::new(r"\\[a-zA-Z]+(\{[^}]*\})?").expect("valid command pattern"));
    let bare_command =
        BARE_COMMAND.get_or_init(|| Regex::new(r"\\[a-zA-Z]+").expect("valid command pattern"));
    let capitalized_run = CAPITALIZED_RUN.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("valid word pattern")
    });

    let cleaned = command_with_arg.replace_all(content, "");
    let cleaned = bare_command.replace_all(&cleaned, "");

    let mut keywords: Vec<String> = Vec::new();
    for word in capitalized_run.find_iter(&cleaned) {
        let word = word.as_str();
        let word_lower = word.to_lowercase();
        let is_technical = TECHNICAL_TERMS
            .iter()
            .any(|term| word_lower.contains(&term.to_lowercase()));
        if is_technical && !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }

    keywords
}

/// Scans a job description for known skill terms, returned lowercase in
/// vocabulary order.
pub fn extract_job_keywords(job_description: &str) -> Vec<String> {
    let job_lower = job_description.to_lowercase();
    JOB_SKILL_TERMS
        .iter()
        .filter(|skill| job_lower.contains(**skill))
        .map(|skill| skill.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = r"\documentclass{article}
\begin{document}
\maketitle
Jane Doe, Springfield. Software engineer with Python experience.
\section{Skills}
Python, Docker, Postgres and more.
\section{Education}
BSc Computer Science, State University.
\section{Experience}
Built services in Python and deployed with Docker.
\end{document}";

    #[test]
    fn test_education_section_is_found_with_nonempty_content() {
        let sections = parse_latex_resume(FULL_RESUME);
        let education = sections
            .iter()
            .find(|s| s.section_type == SectionType::Education)
            .expect("education section present");
        assert!(!education.content.trim().is_empty());
        assert!(education.content.contains("State University"));
    }

    #[test]
    fn test_sections_come_back_in_table_order_not_source_order() {
        // Source order is skills, education, experience; the pattern table
        // puts education first.
        let types: Vec<SectionType> = parse_latex_resume(FULL_RESUME)
            .iter()
            .map(|s| s.section_type)
            .collect();
        assert_eq!(
            types,
            vec![
                SectionType::PersonalInfo,
                SectionType::Education,
                SectionType::Experience,
                SectionType::Skills,
            ]
        );
    }

    #[test]
    fn test_section_matching_is_case_insensitive() {
        let latex = r"\section{EDUCATION} MSc somewhere";
        let sections = parse_latex_resume(latex);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Education);
    }

    #[test]
    fn test_section_content_stops_at_next_section() {
        let sections = parse_latex_resume(FULL_RESUME);
        let skills = sections
            .iter()
            .find(|s| s.section_type == SectionType::Skills)
            .unwrap();
        assert!(skills.content.contains("Docker"));
        assert!(!skills.content.contains("State University"));
    }

    #[test]
    fn test_unstructured_document_falls_back_to_single_general_section() {
        let latex = r"\begin{document}Just one paragraph about Python work.\end{document}";
        let sections = parse_latex_resume(latex);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::General);
        assert!(sections[0].content.contains("Python"));
    }

    #[test]
    fn test_no_markers_at_all_yields_empty() {
        assert!(parse_latex_resume("plain text, no latex here").is_empty());
    }

    #[test]
    fn test_extract_keywords_finds_known_terms() {
        let keywords = extract_keywords("Shipped services with Python and Docker on Aws.");
        assert!(keywords.iter().any(|k| k == "Python"));
        assert!(keywords.iter().any(|k| k == "Docker"));
    }

    #[test]
    fn test_extract_keywords_strips_latex_commands() {
        // \textbf consumes its braced argument, so the keyword must appear in
        // plain text to survive.
        let keywords = extract_keywords(r"\textbf{Docker} plain Python \item");
        assert!(keywords.iter().any(|k| k == "Python"));
        assert!(!keywords.iter().any(|k| k == "Docker"));
    }

    #[test]
    fn test_extract_keywords_caps_at_ten_without_duplicates() {
        // Lowercase filler keeps each term its own capitalized run.
        let content = "used Python and Docker and Python and Docker and Java and \
                       React and Git and Scrum and Agile and Graphql and Kubernetes \
                       and Mongodb and Postgresql and Devops and Sql and Jira again"
            .repeat(3);
        let keywords = extract_keywords(&content);
        assert_eq!(keywords.len(), 10);
        assert!(keywords.len() <= 10);
        let mut deduped = keywords.clone();
        deduped.dedup();
        deduped.sort();
        let mut sorted = keywords.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), keywords.len(), "keywords contain duplicates");
    }

    #[test]
    fn test_extract_job_keywords_lowercase_scan() {
        let jd = "We need Python and AWS experience; Docker is a plus.";
        let keywords = extract_job_keywords(jd);
        assert_eq!(keywords, vec!["python", "aws", "docker"]);
    }

    #[test]
    fn test_extract_job_keywords_empty_when_nothing_matches() {
        assert!(extract_job_keywords("We sell flowers.").is_empty());
    }
}
