//! Sample conversations.
//!
//! The checked-in capture (`samples/conversation.json`) exercises every
//! block kind; [`ConversationBuilder`] builds small targeted captures.

use serde_json::{Value, json};
use std::path::PathBuf;

/// Path of the checked-in sample capture.
pub fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples/conversation.json")
}

/// The checked-in sample capture, parsed.
pub fn sample_conversation() -> Value {
    let content = std::fs::read_to_string(sample_path()).expect("Failed to read sample");
    serde_json::from_str(&content).expect("Sample is not valid JSON")
}

/// Fluent builder for conversation captures.
#[derive(Debug, Clone, Default)]
pub struct ConversationBuilder {
    uuid: Option<String>,
    name: Option<String>,
    model: Option<String>,
    messages: Vec<Value>,
}

impl ConversationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = Some(uuid.to_string());
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Append a human message with string content.
    pub fn human(mut self, text: &str) -> Self {
        self.messages
            .push(json!({"sender": "human", "content": text}));
        self
    }

    /// Append an assistant message with block content.
    pub fn assistant(mut self, blocks: Vec<Value>) -> Self {
        self.messages
            .push(json!({"sender": "assistant", "content": blocks}));
        self
    }

    /// Append an arbitrary raw message.
    pub fn message(mut self, message: Value) -> Self {
        self.messages.push(message);
        self
    }

    pub fn build(self) -> Value {
        let mut conversation = json!({"chat_messages": self.messages});
        if let Some(uuid) = self.uuid {
            conversation["uuid"] = json!(uuid);
        }
        if let Some(name) = self.name {
            conversation["name"] = json!(name);
        }
        if let Some(model) = self.model {
            conversation["model"] = json!(model);
        }
        conversation
    }
}

pub fn text(text: &str) -> Value {
    json!({"type": "text", "text": text})
}

pub fn thinking(text: &str) -> Value {
    json!({"type": "thinking", "thinking": text})
}

pub fn tool_use(id: &str, name: &str, input: Value) -> Value {
    json!({"type": "tool_use", "id": id, "name": name, "input": input})
}

pub fn tool_result(tool_use_id: &str, content: Value) -> Value {
    json!({"type": "tool_result", "tool_use_id": tool_use_id, "content": content})
}

pub fn tool_error(tool_use_id: &str, content: Value) -> Value {
    json!({"type": "tool_result", "tool_use_id": tool_use_id, "content": content, "is_error": true})
}
