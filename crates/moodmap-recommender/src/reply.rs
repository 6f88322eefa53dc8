//! Extraction of JSON payloads from model reply text.
//!
//! Models often wrap JSON in Markdown code fences or add a sentence around
//! it. Reply text is untrusted: it is unwrapped here and then deserialized
//! into strict types by the caller.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("valid fence regex")
});

/// Returns the contents of the first fenced block, or the trimmed text when
/// there is none. An unterminated fence is unwrapped as far as possible.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    if let Some(inner) = FENCED_BLOCK.captures(text).and_then(|c| c.get(1)) {
        return inner.as_str().trim();
    }

    let mut rest = text.trim();
    if let Some(after) = rest.strip_prefix("```") {
        rest = after.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    }
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Unwraps `text` and deserializes it as `T`.
///
/// # Errors
///
/// Returns the `serde_json` error if the unwrapped text is not a valid `T`.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_code_fences(text))
}
