use chatdump_types::{Block, Limit, Thinking, ToolResult, ToolUse};
use log::debug;
use serde_json::{Map, Value};

use crate::classify::{BodyKind, classify_result_body};
use crate::content::{RenderContext, result_body};
use crate::text::{fence, is_multiline, truncate};
use crate::yaml::to_yaml;

/// Tool input fields that carry prose or code rather than metadata
const RICH_FIELDS: &[&str] = &[
    "content",
    "new_str",
    "old_str",
    "text",
    "body",
    "description",
    "message",
    "prompt",
    "code",
    "script",
    "markdown",
    "html",
    "new_string",
    "old_string",
    "file_text",
];

/// Fixed limit for the JSON dump of unrecognized blocks
const UNKNOWN_BLOCK_LIMIT: Limit = Limit::Chars(1000);

/// Render one content block as markdown.
///
/// Returns `None` for blocks that produce no output (token budgets, empty
/// thinking).
pub fn format_block(block: &Block, ctx: &RenderContext<'_>) -> Option<String> {
    match block {
        Block::Text { text } => Some(text.clone()),
        Block::ToolUse(tool) => Some(format_tool_use(tool, ctx)),
        Block::ToolResult(result) => Some(format_tool_result(result, ctx)),
        Block::Thinking(thinking) => format_thinking(thinking, ctx),
        Block::TokenBudget => None,
        Block::Unknown { kind, raw } => Some(format_unknown(kind, raw)),
    }
}

/// Whether an input field should render as its own prose section
pub fn is_rich_field(name: &str, value: &Value) -> bool {
    RICH_FIELDS.contains(&name) && value.as_str().is_some_and(is_multiline)
}

fn format_tool_use(tool: &ToolUse, ctx: &RenderContext<'_>) -> String {
    let limits = &ctx.config.limits;
    let mut sections = vec![format!("### Tool Use: {}", tool.name)];

    let Some(input) = tool.input.as_object() else {
        if !tool.input.is_null() {
            sections.push(json_fence(&tool.input, limits.tool_use_meta));
        }
        return sections.join("\n\n");
    };

    let (rich, metadata): (Vec<_>, Vec<_>) = input
        .iter()
        .partition(|(name, value)| is_rich_field(name, value));

    if !metadata.is_empty() {
        let metadata: Map<String, Value> = metadata
            .into_iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        sections.push(json_fence(&Value::Object(metadata), limits.tool_use_meta));
    }

    for (name, value) in rich {
        let text = value.as_str().unwrap_or_default();
        sections.push(format!(
            "**{}:**\n{}",
            name,
            truncate(text, limits.tool_use_content)
        ));
    }

    sections.join("\n\n")
}

fn json_fence(value: &Value, limit: Limit) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    fence(&truncate(&pretty, limit), "json")
}

fn format_tool_result(result: &ToolResult, ctx: &RenderContext<'_>) -> String {
    let limit = ctx.config.limits.tool_result;

    let mut header = String::from("### Tool Result");
    if let Some(name) = ctx.tool_names.resolve(result) {
        header.push_str(&format!(" ({})", name));
    }
    if result.is_error {
        header.push_str(" (ERROR)");
    }

    let body = result_body(result);
    let rendered = match classify_result_body(&body, result.is_error) {
        BodyKind::Empty => "_(no output)_".to_string(),
        BodyKind::Structured(value) => fence(&truncate(&to_yaml(&value), limit), "yaml"),
        BodyKind::MalformedJson => {
            debug!("tool result body looks like JSON but does not parse");
            fence(&truncate(body.trim(), limit), "json")
        }
        BodyKind::Fenced => fence(&truncate(body.trim_end(), limit), ""),
        BodyKind::Prose => truncate(body.trim_end(), limit),
    };

    format!("{}\n\n{}", header, rendered)
}

fn format_thinking(thinking: &Thinking, ctx: &RenderContext<'_>) -> Option<String> {
    if thinking.text.trim().is_empty() {
        debug!("skipping empty thinking block");
        return None;
    }

    let label = if thinking.truncated {
        "Thinking (truncated)"
    } else {
        "Thinking"
    };

    let mut out = format!(
        "<details>\n<summary>{}</summary>\n\n{}\n",
        label,
        truncate(thinking.text.trim_end(), ctx.config.limits.thinking)
    );

    if !thinking.summaries.is_empty() {
        let summary = thinking
            .summaries
            .iter()
            .map(|fragment| fragment.text())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("\n**Summary:** {}\n", summary));
    }

    out.push_str("</details>");
    Some(out)
}

fn format_unknown(kind: &str, raw: &Value) -> String {
    debug!("rendering unknown block type '{}' as JSON", kind);
    format!(
        "<!-- unknown block type: {} -->\n{}",
        kind,
        json_fence(raw, UNKNOWN_BLOCK_LIMIT)
    )
}
