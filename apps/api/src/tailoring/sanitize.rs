//! Output sanitization — strips generative-model artifacts (reasoning
//! traces, code fences) before the text is treated as the final document.
//!
//! Both passes are best-effort and the whole function is idempotent:
//! re-sanitizing already-clean text is a no-op.

use std::sync::OnceLock;

use regex::Regex;

fn think_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<think>.*?</think>").expect("valid think-block pattern")
    })
}

fn fence_open_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^```[a-zA-Z]*\n").expect("valid fence pattern"))
}

/// Removes `<think>...</think>` blocks and one surrounding code fence, then
/// trims. Returns the input unchanged (minus trim) when neither artifact is
/// present.
pub fn sanitize_model_output(text: &str) -> String {
    let without_think = think_block_pattern().replace_all(text, "");
    strip_enclosing_fence(&without_think).trim().to_string()
}

/// If the text opens with a triple-backtick fence (optionally language
/// tagged) and a later closing fence exists, returns only the enclosed body.
fn strip_enclosing_fence(text: &str) -> &str {
    if let Some(open) = fence_open_pattern().find(text) {
        if let Some(closing_index) = text.rfind("```") {
            if closing_index > open.end() {
                return &text[open.end()..closing_index];
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_think_block_is_removed_entirely() {
        let input = "<think>step 1\nstep 2</think>\\documentclass{article}";
        assert_eq!(sanitize_model_output(input), "\\documentclass{article}");
    }

    #[test]
    fn test_think_removal_is_case_insensitive() {
        let input = "<THINK>hidden</THINK>visible";
        assert_eq!(sanitize_model_output(input), "visible");
    }

    #[test]
    fn test_multiple_think_blocks_are_all_removed() {
        let input = "<think>a</think>keep<think>b</think> this";
        assert_eq!(sanitize_model_output(input), "keep this");
    }

    #[test]
    fn test_tagged_fence_is_stripped() {
        let input = "```latex\n\\section{Skills}\n```";
        assert_eq!(sanitize_model_output(input), "\\section{Skills}");
    }

    #[test]
    fn test_untagged_fence_is_stripped() {
        let input = "```\nbody text\n```";
        assert_eq!(sanitize_model_output(input), "body text");
    }

    #[test]
    fn test_unclosed_fence_is_left_alone() {
        let input = "```latex\nno closing fence here";
        assert_eq!(sanitize_model_output(input), input.trim());
    }

    #[test]
    fn test_plain_text_only_gets_trimmed() {
        assert_eq!(sanitize_model_output("  hello  \n"), "hello");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "<think>reasoning</think>```latex\n\\documentclass{article}\n```",
            "```\nplain\n```",
            "nothing to strip",
            "  padded  ",
            "<THINK>a</THINK>rest",
        ];
        for input in inputs {
            let once = sanitize_model_output(input);
            let twice = sanitize_model_output(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
