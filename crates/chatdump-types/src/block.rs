use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::value::{array_field, flag, str_field};

/// One typed unit of message content.
///
/// The kind is resolved from the `type` tag once, at decode time. Tags this
/// crate does not know about are kept whole in [`Block::Unknown`] so
/// formatters can still dump them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Text { text: String },
    ToolUse(ToolUse),
    ToolResult(ToolResult),
    Thinking(Thinking),
    TokenBudget,
    Unknown { kind: String, raw: Value },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolUse {
    pub id: Option<String>,
    pub name: String,
    /// Named input parameters; normally an object, kept as-is otherwise
    pub input: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    pub tool_use_id: Option<String>,
    pub name: Option<String>,
    pub is_error: bool,
    pub content: ToolResultContent,
}

/// Polymorphic `tool_result.content`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum ToolResultContent {
    Text(String),
    /// Sub-blocks (text, image, anything else), kept raw
    Parts(Vec<Value>),
    Other(Value),
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thinking {
    pub text: String,
    pub truncated: bool,
    pub summaries: Vec<SummaryFragment>,
}

/// A thinking summary: either a bare string or an object exposing `summary`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryFragment {
    Text(String),
    Object(Value),
}

impl SummaryFragment {
    /// Human-readable text of this fragment.
    ///
    /// Objects without a string `summary` field fall back to their JSON form.
    pub fn text(&self) -> String {
        match self {
            SummaryFragment::Text(text) => text.clone(),
            SummaryFragment::Object(value) => value
                .get("summary")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
        }
    }
}

impl Block {
    /// Decode a block from its JSON form. Never fails.
    pub fn from_value(value: Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Block::Unknown {
                kind: "unknown".to_string(),
                raw: value,
            };
        };

        let kind = str_field(obj, &["type"]).unwrap_or_else(|| "unknown".to_string());
        match kind.as_str() {
            "text" => Block::Text {
                text: str_field(obj, &["text"]).unwrap_or_default(),
            },
            "tool_use" => Block::ToolUse(ToolUse {
                id: str_field(obj, &["id"]),
                name: str_field(obj, &["name"]).unwrap_or_else(|| "unknown".to_string()),
                input: obj
                    .get("input")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new())),
            }),
            "tool_result" => Block::ToolResult(ToolResult {
                tool_use_id: str_field(obj, &["tool_use_id"]),
                name: str_field(obj, &["name"]),
                is_error: flag(obj, &["is_error"]),
                content: ToolResultContent::from_value(obj.get("content")),
            }),
            "thinking" => Block::Thinking(Thinking {
                text: str_field(obj, &["thinking", "text"]).unwrap_or_default(),
                truncated: flag(obj, &["truncated", "cut_off"]),
                summaries: array_field(obj, "summaries")
                    .iter()
                    .map(SummaryFragment::from_value)
                    .collect(),
            }),
            "token_budget" => Block::TokenBudget,
            _ => Block::Unknown { kind, raw: value },
        }
    }
}

impl ToolResultContent {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => ToolResultContent::Absent,
            Some(Value::String(text)) => ToolResultContent::Text(text.clone()),
            Some(Value::Array(parts)) => ToolResultContent::Parts(parts.clone()),
            Some(other) => ToolResultContent::Other(other.clone()),
        }
    }
}

impl SummaryFragment {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(text) => SummaryFragment::Text(text.clone()),
            other => SummaryFragment::Object(other.clone()),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Block::from_value)
    }
}
