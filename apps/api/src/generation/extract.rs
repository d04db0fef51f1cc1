//! Free-text JSON extraction.
//!
//! Last-resort path for responses that carry prose instead of a tool call.
//! Tool-call arguments never go through here.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::generation::GenerationError;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\r?\n?(.*?)```").expect("fence pattern is valid")
});
static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("object pattern is valid"));
static ARRAY_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("array pattern is valid"));

/// Finds the first JSON-looking span in `text`.
///
/// A fenced code block wins if its body starts like JSON. Otherwise the
/// earlier of the first `{...}` and `[...]` spans, each running to the last
/// matching closer.
pub fn find_json_span(text: &str) -> Option<&str> {
    if let Some(body) = FENCED_BLOCK
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
    {
        if body.starts_with('{') || body.starts_with('[') {
            return Some(body);
        }
    }

    let object = OBJECT_SPAN.find(text);
    let array = ARRAY_SPAN.find(text);

    let span = match (object, array) {
        (Some(o), Some(a)) => {
            if a.start() < o.start() {
                a
            } else {
                o
            }
        }
        (Some(o), None) => o,
        (None, Some(a)) => a,
        (None, None) => return None,
    };
    Some(span.as_str())
}

/// Extracts and parses the first JSON span in free text.
pub fn extract_json(text: &str) -> Result<Value, GenerationError> {
    let span = find_json_span(text).ok_or(GenerationError::NoStructuredOutput)?;
    serde_json::from_str(span).map_err(|e| GenerationError::MalformedJson(e.to_string()))
}
