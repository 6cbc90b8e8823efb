//! Cleanup of raw model output

use regex::Regex;
use std::sync::LazyLock;

static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid think-block regex"));

/// Remove `<think>...</think>` reasoning traces and surrounding whitespace
pub fn strip_thinking(text: &str) -> String {
    THINK_BLOCK.replace_all(text, "").trim().to_string()
}

/// Outermost `{...}` span of the answer, ignoring any reasoning trace and
/// markdown code fences around it.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let body = match text.rfind("</think>") {
        Some(idx) => &text[idx + "</think>".len()..],
        None => text,
    };
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    (end > start).then(|| &body[start..=end])
}
