//! Shared extraction helpers used by both output vocabularies.

use chatdump_types::{Block, Conversation, ToolResult, ToolResultContent};
use serde_json::Value;
use std::collections::HashMap;

use crate::config::ExportConfig;
use crate::unwrap::unwrap_tool_output;

/// Flatten tool result content to one string.
///
/// Sub-block lists are joined by newlines: text parts contribute their
/// text, images an `[image: <source kind>]` marker, anything else its JSON.
pub fn result_text(content: &ToolResultContent) -> String {
    match content {
        ToolResultContent::Text(text) => text.clone(),
        ToolResultContent::Parts(parts) => parts
            .iter()
            .map(part_text)
            .collect::<Vec<_>>()
            .join("\n"),
        ToolResultContent::Other(value) => value.to_string(),
        ToolResultContent::Absent => String::new(),
    }
}

fn part_text(part: &Value) -> String {
    match part.get("type").and_then(Value::as_str) {
        Some("text") => part
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some("image") => {
            let source = part
                .pointer("/source/type")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            format!("[image: {}]", source)
        }
        _ => match part {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}

/// Normalized and unwrapped body of a tool result
pub fn result_body(result: &ToolResult) -> String {
    unwrap_tool_output(&result_text(&result.content))
}

/// Tool names by tool_use id, for results that do not carry their own name
#[derive(Debug, Default)]
pub struct ToolNames<'a> {
    by_id: HashMap<&'a str, &'a str>,
}

impl<'a> ToolNames<'a> {
    pub fn collect(conversation: &'a Conversation) -> Self {
        let by_id = conversation
            .blocks()
            .filter_map(|block| match block {
                Block::ToolUse(tool) => tool.id.as_deref().map(|id| (id, tool.name.as_str())),
                _ => None,
            })
            .collect();
        Self { by_id }
    }

    /// The result's own name, else the name of the matching tool_use
    pub fn resolve<'r>(&self, result: &'r ToolResult) -> Option<&'r str>
    where
        'a: 'r,
    {
        result.name.as_deref().or_else(|| {
            result
                .tool_use_id
                .as_deref()
                .and_then(|id| self.by_id.get(id).copied())
        })
    }
}

/// Everything a block formatter needs besides the block itself
pub struct RenderContext<'a> {
    pub config: &'a ExportConfig,
    pub tool_names: ToolNames<'a>,
}

impl<'a> RenderContext<'a> {
    pub fn new(conversation: &'a Conversation, config: &'a ExportConfig) -> Self {
        Self {
            config,
            tool_names: ToolNames::collect(conversation),
        }
    }
}
