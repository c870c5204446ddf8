//! Core data types shared across the tailoring pipeline.

use serde::{Deserialize, Serialize};

/// The section kinds the structural parser knows how to recognize.
///
/// `General` is the fallback used when a document has no recognizable
/// `\section` markers but does carry a `\begin{document}...\end{document}`
/// span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    PersonalInfo,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Awards,
    Publications,
    Languages,
    Interests,
    General,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::PersonalInfo => "personal_info",
            SectionType::Education => "education",
            SectionType::Experience => "experience",
            SectionType::Skills => "skills",
            SectionType::Projects => "projects",
            SectionType::Certifications => "certifications",
            SectionType::Awards => "awards",
            SectionType::Publications => "publications",
            SectionType::Languages => "languages",
            SectionType::Interests => "interests",
            SectionType::General => "general",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed resume section. Produced only by the parser and immutable
/// afterwards; `keywords` never exceeds 10 entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub section_type: SectionType,
    pub content: String,
    pub keywords: Vec<String>,
}

/// One similarity hit from the content store, derived per query and never
/// persisted. `similarity` carries the cosine distance of the hit, so
/// nearest-first ordering means ascending values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub content: String,
    pub section_type: String,
    pub similarity: f32,
}

/// Resume-vs-job-description keyword analysis returned by `/resume/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// `100 * |matching| / |job keywords|`; 0.0 when the JD yields no keywords.
    pub match_percentage: f32,
    /// Sorted for deterministic output.
    pub matching_keywords: Vec<String>,
    /// In job-keyword extraction order.
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
}
