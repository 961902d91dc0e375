//! Compact YAML-like rendering of arbitrary JSON values.
//!
//! Multiline strings become `|` block scalars with their lines copied
//! verbatim, short scalar arrays stay inline, everything else is block style
//! with two spaces per nesting level. Output is deterministic: object keys
//! keep their insertion order.

use serde_json::{Map, Value};

use crate::text::{quote, scalar_string};

/// Inline arrays must have a compact JSON form shorter than this
const INLINE_ARRAY_MAX: usize = 80;

/// Render any JSON value as YAML-like text
pub fn to_yaml(value: &Value) -> String {
    match value {
        Value::String(s) if s.contains('\n') => block_scalar(s, 1),
        other => match render(other, 0) {
            Rendered::Inline(s) | Rendered::Block(s) => s,
        },
    }
}

/// Rendered form of one value
enum Rendered {
    /// Goes on the same line as its key or dash. Block scalars also live
    /// here: the `|` marker is inline, their lines follow.
    Inline(String),
    /// Starts on its own line; every line carries its own indentation
    Block(String),
}

fn pad(level: usize) -> String {
    "  ".repeat(level)
}

/// Render `value` whose nested lines belong at `level`
fn render(value: &Value, level: usize) -> Rendered {
    match value {
        Value::Null => Rendered::Inline("null".to_string()),
        Value::Bool(b) => Rendered::Inline(b.to_string()),
        Value::Number(n) => Rendered::Inline(n.to_string()),
        Value::String(s) if s.contains('\n') => Rendered::Inline(block_scalar(s, level)),
        Value::String(s) => Rendered::Inline(scalar_string(s)),
        Value::Array(items) if items.is_empty() => Rendered::Inline("[]".to_string()),
        Value::Array(items) => match inline_array(items) {
            Some(inline) => Rendered::Inline(inline),
            None => Rendered::Block(render_sequence(items, level)),
        },
        Value::Object(map) if map.is_empty() => Rendered::Inline("{}".to_string()),
        Value::Object(map) => Rendered::Block(render_mapping(map, level)),
    }
}

fn block_scalar(s: &str, level: usize) -> String {
    let indent = pad(level);
    let mut out = String::from("|");
    for line in s.split('\n') {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&indent);
            out.push_str(line);
        }
    }
    out
}

/// `[a, b, c]` when every item is a scalar and the array is short
fn inline_array(items: &[Value]) -> Option<String> {
    if items.iter().any(|v| v.is_object() || v.is_array()) {
        return None;
    }

    let compact = Value::Array(items.to_vec()).to_string();
    if compact.chars().count() >= INLINE_ARRAY_MAX {
        return None;
    }

    let rendered: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::String(s) => quote(s),
            other => other.to_string(),
        })
        .collect();
    Some(format!("[{}]", rendered.join(", ")))
}

fn render_mapping(map: &Map<String, Value>, level: usize) -> String {
    let indent = pad(level);
    map.iter()
        .map(|(key, value)| {
            let key = scalar_string(key);
            match render(value, level + 1) {
                Rendered::Inline(s) => format!("{indent}{key}: {s}"),
                Rendered::Block(s) => format!("{indent}{key}:\n{s}"),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_sequence(items: &[Value], level: usize) -> String {
    let indent = pad(level);
    let nested = pad(level + 1);
    items
        .iter()
        .map(|item| match render(item, level + 1) {
            Rendered::Inline(s) => format!("{indent}- {s}"),
            // The first nested line moves up beside the dash; the rest
            // already sit at the dash content's indentation.
            Rendered::Block(s) => match s.strip_prefix(&nested) {
                Some(rest) => format!("{indent}- {rest}"),
                None => format!("{indent}-\n{s}"),
            },
        })
        .collect::<Vec<_>>()
        .join("\n")
}
