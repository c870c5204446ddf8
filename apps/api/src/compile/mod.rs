//! LaTeX compilation — normalizes untrusted LaTeX and runs the `tectonic`
//! engine in a throwaway working directory.
//!
//! Safety properties: the engine is invoked with a literal argv (no shell
//! interpretation of resume content), each call gets a fresh uniquely named
//! temp directory that is removed on every exit path, and the subprocess is
//! bounded by a wall-clock timeout.

use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

/// External typesetting engine. XeTeX-class, which is why pdfTeX primitives
/// get filtered out in preprocessing.
const ENGINE: &str = "tectonic";
const TEX_FILE: &str = "resume.tex";
const PDF_FILE: &str = "resume.pdf";
const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);

/// Structured compilation failure carrying the engine's diagnostics for UI
/// display.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CompilationError {
    pub message: String,
    pub stdout: String,
    pub stderr: String,
}

impl CompilationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// Message plus captured engine output, for the 422 response body.
    pub fn detail(&self) -> String {
        format!("{}\n{}\n{}", self.message, self.stdout, self.stderr)
    }
}

/// Normalizes incoming LaTeX for compilation: strips one enclosing code
/// fence, drops engine-incompatible primitives, and wraps fragments in a
/// minimal document template.
pub fn preprocess(latex_source: &str) -> String {
    let without_fences = strip_code_fences(latex_source);
    let sanitized = drop_pdftex_primitives(without_fences);
    ensure_document_structure(&sanitized)
}

/// Removes a single surrounding markdown code fence if present.
fn strip_code_fences(text: &str) -> &str {
    let stripped = text.trim();
    if stripped.starts_with("```") && stripped.ends_with("```") && stripped.len() > 6 {
        if let Some(first_newline) = stripped.find('\n') {
            return &stripped[first_newline + 1..stripped.len() - 3];
        }
    }
    stripped
}

/// Drops (not comments) every line referencing a pdfTeX primitive that fails
/// under a XeTeX-class engine.
fn drop_pdftex_primitives(text: &str) -> String {
    text.lines()
        .filter(|line| {
            !line.contains("\\input{glyphtounicode}") && !line.contains("\\pdfgentounicode")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps bare LaTeX fragments in a minimal default document so arbitrary
/// snippets remain compilable; full documents pass through unchanged.
fn ensure_document_structure(body: &str) -> String {
    let text = body.trim();
    if text.contains("\\documentclass") && text.contains("\\begin{document}") {
        return text.to_string();
    }

    let template = r"\documentclass[11pt]{article}
\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage{geometry}
\usepackage{hyperref}
\usepackage{enumitem}
\usepackage{amsmath, amssymb}
\usepackage{graphicx}
\geometry{margin=1in}
\begin{document}
% Auto-wrapped by server because the input LaTeX was not a full document.
";

    format!("{template}{text}\n\\end{{document}}\n")
}

/// Compiles LaTeX source to PDF bytes.
///
/// Success requires both a zero exit status and the output PDF existing;
/// `continue-on-errors` means the engine can exit zero without producing
/// one. The working directory is deleted when this returns, on every path.
pub async fn compile_to_pdf(latex_source: &str) -> Result<Vec<u8>, CompilationError> {
    let work_dir = tempfile::Builder::new()
        .prefix("latex_build_")
        .tempdir()
        .map_err(|e| CompilationError::new(format!("failed to create build directory: {e}")))?;

    let tex_path = work_dir.path().join(TEX_FILE);
    let pdf_path = work_dir.path().join(PDF_FILE);

    let preprocessed = preprocess(latex_source);
    tokio::fs::write(&tex_path, &preprocessed)
        .await
        .map_err(|e| CompilationError::new(format!("failed to write LaTeX source: {e}")))?;

    // Literal argv, never a shell: resume content cannot inject commands.
    let invocation = Command::new(ENGINE)
        .arg(&tex_path)
        .arg("-o")
        .arg(work_dir.path())
        .arg("-Z")
        .arg("continue-on-errors")
        .current_dir(work_dir.path())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(COMPILE_TIMEOUT, invocation).await {
        Err(_) => {
            return Err(CompilationError::new(format!(
                "LaTeX compilation timed out after {}s.",
                COMPILE_TIMEOUT.as_secs()
            )))
        }
        Ok(Err(e)) => {
            return Err(CompilationError::new(format!(
                "failed to run {ENGINE}: {e}"
            )))
        }
        Ok(Ok(output)) => output,
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() || !pdf_path.exists() {
        return Err(CompilationError {
            message: "LaTeX compilation failed.".to_string(),
            stdout,
            stderr,
        });
    }

    tokio::fs::read(&pdf_path)
        .await
        .map_err(|e| CompilationError::new(format!("failed to read output PDF: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DOC: &str =
        "\\documentclass{article}\n\\begin{document}\nHello\n\\end{document}";

    #[test]
    fn test_full_document_passes_through_unchanged() {
        assert_eq!(preprocess(FULL_DOC), FULL_DOC);
    }

    #[test]
    fn test_enclosing_fence_is_stripped() {
        let fenced = format!("```latex\n{FULL_DOC}\n```");
        assert_eq!(preprocess(&fenced), FULL_DOC);
    }

    #[test]
    fn test_pdftex_primitive_lines_are_dropped_not_commented() {
        let source = "\\documentclass{article}\n\\input{glyphtounicode}\n\\pdfgentounicode=1\n\\begin{document}\nHi\n\\end{document}";
        let out = preprocess(source);
        assert!(!out.contains("glyphtounicode"));
        assert!(!out.contains("pdfgentounicode"));
        assert!(out.contains("\\begin{document}"));
    }

    #[test]
    fn test_fragment_gets_wrapped_in_default_template() {
        let out = preprocess("Some plain resume text.");
        assert!(out.contains("\\documentclass[11pt]{article}"));
        assert!(out.contains("\\geometry{margin=1in}"));
        assert!(out.contains("Some plain resume text."));
        assert_eq!(out.matches("\\begin{document}").count(), 1);
        assert_eq!(out.matches("\\end{document}").count(), 1);
    }

    #[test]
    fn test_full_document_keeps_single_document_markers() {
        let out = preprocess(FULL_DOC);
        assert_eq!(out.matches("\\begin{document}").count(), 1);
        assert_eq!(out.matches("\\end{document}").count(), 1);
    }

    #[test]
    fn test_glyphtounicode_only_fragment_still_wraps_cleanly() {
        let out = preprocess("\\input{glyphtounicode}\nHello resume body");
        assert!(!out.contains("glyphtounicode"));
        assert_eq!(out.matches("\\begin{document}").count(), 1);
        assert_eq!(out.matches("\\end{document}").count(), 1);
    }

    // Integration tests below need the tectonic binary on PATH; run with
    // `cargo test -- --ignored` on a machine with the engine installed.

    #[tokio::test]
    #[ignore]
    async fn test_compile_hello_world_yields_pdf_magic() {
        let pdf = compile_to_pdf(FULL_DOC).await.expect("compilation succeeds");
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_compile_fragment_with_pdftex_primitive_succeeds() {
        let pdf = compile_to_pdf("\\input{glyphtounicode}\nHello from a fragment")
            .await
            .expect("offending line is dropped before compilation");
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_compile_failure_carries_engine_diagnostics() {
        let err = compile_to_pdf("\\documentclass{article}\\begin{document}\\undefinedmacro\\end{document}")
            .await
            .expect_err("undefined control sequence without continue-on-errors recovery");
        assert!(!err.detail().trim().is_empty());
    }
}
