use chatdump_types::{Block, Thinking, ToolResult, ToolUse};
use log::debug;
use serde_json::Value;

use super::Lines;
use crate::content::{RenderContext, result_body};
use crate::text::{ellipsize, first_line, is_multiline, take_chars, truncate};

/// Input fields checked, in order, for the one-line tool summary
const SUMMARY_FIELDS: &[&str] = &[
    "file_path", "path", "command", "pattern", "query", "url", "skill", "title",
];

/// Summary values of these fields are cut to [`SUMMARY_MAX`] characters
const CUT_SUMMARY_FIELDS: &[&str] = &["command", "query", "url", "title"];

const SUMMARY_MAX: usize = 80;
const FIELD_VALUE_MAX: usize = 120;
const THINKING_PREVIEW_MAX: usize = 80;

/// Render one block beneath a parent line at `depth`.
///
/// Suppressed blocks (token budgets, blank text or thinking) push nothing.
pub fn format_block(block: &Block, depth: usize, ctx: &RenderContext<'_>, out: &mut Lines) {
    match block {
        Block::Text { text } => out.push_text(depth + 1, text),
        Block::ToolUse(tool) => format_tool_use(tool, depth, out),
        Block::ToolResult(result) => format_tool_result(result, depth, ctx, out),
        Block::Thinking(thinking) => format_thinking(thinking, depth, ctx, out),
        Block::TokenBudget => {}
        Block::Unknown { kind, .. } => {
            debug!("outline: unknown block type '{}'", kind);
            out.push(depth + 1, format!("unknown:: {}", kind));
        }
    }
}

/// `→ <value>` for the first summary field present in `input`, or empty
pub fn tool_summary(input: &Value) -> String {
    let Some(obj) = input.as_object() else {
        return String::new();
    };

    SUMMARY_FIELDS
        .iter()
        .find_map(|field| obj.get(*field).map(|value| (*field, value)))
        .map(|(field, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let text = match field {
                "command" => ellipsize(first_line(&text), SUMMARY_MAX),
                f if CUT_SUMMARY_FIELDS.contains(&f) => ellipsize(&text, SUMMARY_MAX),
                _ => text,
            };
            format!("→ {}", text)
        })
        .unwrap_or_default()
}

fn format_tool_use(tool: &ToolUse, depth: usize, out: &mut Lines) {
    let summary = tool_summary(&tool.input);
    if summary.is_empty() {
        out.push(depth + 1, format!("tool:: {}", tool.name));
    } else {
        out.push(depth + 1, format!("tool:: {} {}", tool.name, summary));
    }

    let field_depth = depth + 2;
    match &tool.input {
        Value::Object(input) => {
            for (key, value) in input {
                format_field(key, value, field_depth, out);
            }
        }
        Value::Null => {}
        other => format_field("input", other, field_depth, out),
    }
}

fn format_field(key: &str, value: &Value, depth: usize, out: &mut Lines) {
    match value {
        Value::String(s) if is_multiline(s) => {
            out.push(depth, format!("{}::", key));
            out.push_text(depth + 1, s);
        }
        Value::String(s) => out.push(depth, format!("{}:: {}", key, ellipsize(s, FIELD_VALUE_MAX))),
        other => out.push(depth, format!("{}:: {}", key, other)),
    }
}

fn format_tool_result(result: &ToolResult, depth: usize, ctx: &RenderContext<'_>, out: &mut Lines) {
    let mut label = String::from("result::");
    if result.is_error {
        label.push_str(" ERROR");
    }
    if let Some(name) = ctx.tool_names.resolve(result) {
        label.push(' ');
        label.push_str(name);
    }

    let body = truncate(result_body(result).trim(), ctx.config.limits.tool_result);
    let mut lines = body.lines();
    match lines.next() {
        Some(first) if !first.trim().is_empty() => {
            out.push(depth + 1, format!("{} {}", label, first.trim_end()))
        }
        _ => out.push(depth + 1, label),
    }

    let rest: Vec<&str> = lines.collect();
    out.push_text(depth + 2, &rest.join("\n"));
}

fn format_thinking(thinking: &Thinking, depth: usize, ctx: &RenderContext<'_>, out: &mut Lines) {
    let text = thinking.text.trim();
    if text.is_empty() {
        return;
    }

    let head = first_line(text);
    let mut preview = take_chars(head, THINKING_PREVIEW_MAX);
    if is_multiline(text) {
        preview.push_str("...");
    }
    out.push(depth + 1, format!("thinking:: {}", preview));
    out.push_text(depth + 2, &truncate(text, ctx.config.limits.thinking));

    if !thinking.summaries.is_empty() {
        let summary = thinking
            .summaries
            .iter()
            .map(|fragment| fragment.text())
            .collect::<Vec<_>>()
            .join(" ");
        out.push(depth + 2, format!("summary:: {}", summary));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use chatdump_types::Conversation;
    use serde_json::json;

    fn render(block: Value) -> String {
        let conversation = Conversation::default();
        let config = ExportConfig::default();
        let ctx = RenderContext::new(&conversation, &config);
        let mut out = Lines::new();
        format_block(&Block::from_value(block), 0, &ctx, &mut out);
        out.finish()
    }

    #[test]
    fn test_text_lines_nested() {
        assert_eq!(
            render(json!({"type": "text", "text": "one\n\ntwo"})),
            "  one\n  two"
        );
        assert_eq!(render(json!({"type": "text", "text": "   "})), "");
    }

    #[test]
    fn test_tool_summary_priority() {
        assert_eq!(
            tool_summary(&json!({"content": "a\nb", "file_path": "/tmp/x.py"})),
            "→ /tmp/x.py"
        );
        assert_eq!(
            tool_summary(&json!({"path": "/a", "file_path": "/b"})),
            "→ /b"
        );
        assert_eq!(tool_summary(&json!({"other": 1})), "");
        assert_eq!(tool_summary(&json!("not an object")), "");
    }

    #[test]
    fn test_tool_summary_command_first_line_cut() {
        let command = format!("{}\nsecond line", "x".repeat(100));
        assert_eq!(
            tool_summary(&json!({"command": command})),
            format!("→ {}...", "x".repeat(80))
        );
        assert_eq!(
            tool_summary(&json!({"command": "ls -la\ncd /"})),
            "→ ls -la"
        );
    }

    #[test]
    fn test_tool_summary_path_not_cut() {
        let path = format!("/{}", "d".repeat(100));
        assert_eq!(tool_summary(&json!({"path": path.clone()})), format!("→ {}", path));
    }

    #[test]
    fn test_tool_use_fields() {
        let out = render(json!({
            "type": "tool_use",
            "name": "create_file",
            "input": {
                "file_path": "/tmp/x.py",
                "content": "line1\nline2",
                "options": {"mode": 420},
                "overwrite": true,
                "note": "n".repeat(130)
            }
        }));

        assert_eq!(
            out,
            format!(
                "  tool:: create_file → /tmp/x.py\n    file_path:: /tmp/x.py\n    content::\n      line1\n      line2\n    options:: {{\"mode\":420}}\n    overwrite:: true\n    note:: {}...",
                "n".repeat(120)
            )
        );
    }

    #[test]
    fn test_tool_use_without_summary() {
        assert_eq!(
            render(json!({"type": "tool_use", "name": "noop", "input": {}})),
            "  tool:: noop"
        );
    }

    #[test]
    fn test_tool_result_labels() {
        assert_eq!(
            render(json!({"type": "tool_result", "name": "bash", "is_error": true, "content": "boom\ntrace"})),
            "  result:: ERROR bash boom\n    trace"
        );
        assert_eq!(
            render(json!({"type": "tool_result", "content": "{\"returncode\":0,\"stdout\":\"hello\\n\",\"stderr\":\"\"}"})),
            "  result:: hello"
        );
        assert_eq!(
            render(json!({"type": "tool_result", "name": "x", "content": ""})),
            "  result:: x"
        );
    }

    #[test]
    fn test_thinking_preview_and_full_text() {
        let out = render(json!({
            "type": "thinking",
            "thinking": "First thought\nSecond thought",
            "summaries": [{"summary": "Pondering"}]
        }));
        assert_eq!(
            out,
            "  thinking:: First thought...\n    First thought\n    Second thought\n    summary:: Pondering"
        );
    }

    #[test]
    fn test_single_line_thinking_preview_has_no_ellipsis() {
        let text = "t".repeat(90);
        let out = render(json!({"type": "thinking", "thinking": text.clone()}));
        assert_eq!(out, format!("  thinking:: {}\n    {}", "t".repeat(80), text));
    }

    #[test]
    fn test_suppressed_blocks() {
        assert_eq!(render(json!({"type": "thinking", "thinking": ""})), "");
        assert_eq!(render(json!({"type": "token_budget"})), "");
    }

    #[test]
    fn test_unknown_block() {
        assert_eq!(
            render(json!({"type": "citation", "url": "x"})),
            "  unknown:: citation"
        );
    }
}
