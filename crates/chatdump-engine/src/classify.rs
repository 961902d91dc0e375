use serde_json::Value;

use crate::text::{is_multiline, looks_like_json};

/// Single-line bodies shorter than this are fenced
const SHORT_BODY_MAX: usize = 200;

/// How a tool result body should be presented
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    Empty,
    /// Parsed JSON, rendered through the YAML-like renderer
    Structured(Value),
    /// Opens like JSON but does not parse
    MalformedJson,
    /// Short output or an error, shown verbatim in a plain fence
    Fenced,
    /// File contents and prose, left as raw markdown
    Prose,
}

/// Classify a (normalized, unwrapped) tool result body
pub fn classify_result_body(body: &str, is_error: bool) -> BodyKind {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return BodyKind::Empty;
    }

    if looks_like_json(trimmed) {
        return match serde_json::from_str(trimmed) {
            Ok(value) => BodyKind::Structured(value),
            Err(_) => BodyKind::MalformedJson,
        };
    }

    let short = !is_multiline(trimmed) && trimmed.chars().count() < SHORT_BODY_MAX;
    if short || is_error {
        BodyKind::Fenced
    } else {
        BodyKind::Prose
    }
}
