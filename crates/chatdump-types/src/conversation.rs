use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::block::Block;
use crate::file_ref::FileRef;
use crate::value::{array_field, non_blank, str_field};
use crate::Result;

/// A captured chat session.
///
/// Messages are kept in the order they were received. Parent links are
/// decoded but never used to rebuild a tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversation {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub model: Option<String>,
    pub messages: Vec<Message>,
}

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Human,
    Assistant,
}

impl Sender {
    fn parse(sender: Option<&str>) -> Self {
        match sender {
            Some("human") | Some("user") => Sender::Human,
            _ => Sender::Assistant,
        }
    }
}

/// Polymorphic message content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<Block>),
    /// No usable content; formatters fall back to [`Message::text`]
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub uuid: Option<String>,
    pub parent_uuid: Option<String>,
    pub created_at: Option<String>,
    pub sender: Sender,
    pub content: MessageContent,
    /// Plain-text fallback used when `content` is absent
    pub text: Option<String>,
    pub attachments: Vec<Attachment>,
}

/// A file attached to a message by the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub name: String,
    pub kind: String,
    pub extracted_content: Option<String>,
    pub file: Option<FileRef>,
}

impl Conversation {
    /// Decode a conversation from captured JSON. Never fails.
    ///
    /// A non-object value yields an empty conversation.
    pub fn from_value(value: Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            uuid: str_field(obj, &["uuid"]),
            name: str_field(obj, &["name"]),
            model: str_field(obj, &["model"]),
            messages: array_field(obj, "chat_messages")
                .iter()
                .map(Message::from_value)
                .collect(),
        }
    }

    /// Parse captured JSON text. Only syntactically invalid JSON is an error.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Ok(Self::from_value(value))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Display title, falling back to a placeholder for unnamed sessions
    pub fn title(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.trim(),
            _ => "Untitled conversation",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterate all blocks of all messages in presentation order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.messages.iter().flat_map(|message| message.blocks())
    }
}

impl Message {
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        let content = match obj.get("content") {
            Some(Value::String(text)) => MessageContent::Text(text.clone()),
            Some(Value::Array(blocks)) if !blocks.is_empty() => {
                MessageContent::Blocks(blocks.iter().cloned().map(Block::from_value).collect())
            }
            _ => MessageContent::Absent,
        };

        let attachments = array_field(obj, "attachments")
            .iter()
            .chain(array_field(obj, "files"))
            .map(Attachment::from_value)
            .collect();

        Self {
            uuid: str_field(obj, &["uuid"]),
            parent_uuid: str_field(obj, &["parent_message_uuid"]),
            created_at: str_field(obj, &["created_at"]),
            sender: Sender::parse(str_field(obj, &["sender", "role"]).as_deref()),
            content,
            text: str_field(obj, &["text"]),
            attachments,
        }
    }

    /// Content blocks, empty unless content is a block list
    pub fn blocks(&self) -> &[Block] {
        match &self.content {
            MessageContent::Blocks(blocks) => blocks,
            _ => &[],
        }
    }

    /// Plain text of the message: string content, the text blocks joined by
    /// newlines, or the fallback text field.
    pub fn plain_text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => {
                let joined = blocks
                    .iter()
                    .filter_map(|block| match block {
                        Block::Text { text } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                non_blank(Some(joined))
                    .or_else(|| self.text.clone())
                    .unwrap_or_default()
            }
            MessageContent::Absent => self.text.clone().unwrap_or_default(),
        }
    }
}

impl Attachment {
    pub fn from_value(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        Self {
            name: str_field(obj, &["file_name", "name"]).unwrap_or_else(|| "unnamed".to_string()),
            kind: str_field(obj, &["file_type", "file_kind", "type"])
                .unwrap_or_else(|| "unknown".to_string()),
            extracted_content: non_blank(str_field(obj, &["extracted_content"])),
            file: FileRef::from_object(obj),
        }
    }
}

impl<'de> Deserialize<'de> for Conversation {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Conversation::from_value)
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|value| Message::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_non_object_is_empty_conversation() {
        let conversation = Conversation::from_value(json!([1, 2, 3]));
        assert!(conversation.is_empty());
        assert_eq!(conversation.title(), "Untitled conversation");
    }

    #[test]
    fn test_wrong_field_types_degrade() {
        let conversation = Conversation::from_value(json!({
            "uuid": 42,
            "name": ["not", "a", "name"],
            "chat_messages": [{"sender": "human", "content": 17, "text": "fallback"}]
        }));

        assert!(conversation.uuid.is_none());
        assert!(conversation.name.is_none());
        assert_eq!(conversation.messages.len(), 1);

        let message = &conversation.messages[0];
        assert_eq!(message.content, MessageContent::Absent);
        assert_eq!(message.plain_text(), "fallback");
    }

    #[test]
    fn test_sender_classification() {
        let sender = |s: Value| Message::from_value(&json!({"sender": s})).sender;
        assert_eq!(sender(json!("human")), Sender::Human);
        assert_eq!(sender(json!("user")), Sender::Human);
        assert_eq!(sender(json!("assistant")), Sender::Assistant);
        assert_eq!(sender(json!("system")), Sender::Assistant);
        assert_eq!(sender(Value::Null), Sender::Assistant);

        let by_role = Message::from_value(&json!({"role": "user"}));
        assert_eq!(by_role.sender, Sender::Human);
    }

    #[test]
    fn test_empty_block_list_falls_back_to_text() {
        let message = Message::from_value(&json!({"content": [], "text": "plain"}));
        assert_eq!(message.content, MessageContent::Absent);
        assert_eq!(message.plain_text(), "plain");
    }

    #[test]
    fn test_plain_text_joins_text_blocks() {
        let message = Message::from_value(&json!({
            "sender": "human",
            "content": [
                {"type": "text", "text": "first"},
                {"type": "tool_use", "name": "x", "input": {}},
                {"type": "text", "text": "second"}
            ]
        }));
        assert_eq!(message.plain_text(), "first\nsecond");
        assert_eq!(message.blocks().len(), 3);
    }

    #[test]
    fn test_attachments_and_files() {
        let message = Message::from_value(&json!({
            "attachments": [{"file_name": "notes.txt", "file_type": "txt", "extracted_content": "hello"}],
            "files": [{"file_name": "photo.jpg", "file_kind": "image"}, "garbage"]
        }));

        assert_eq!(message.attachments.len(), 3);
        assert_eq!(message.attachments[0].name, "notes.txt");
        assert_eq!(message.attachments[0].extracted_content.as_deref(), Some("hello"));
        assert_eq!(message.attachments[1].kind, "image");
        assert_eq!(message.attachments[2].name, "unnamed");
        assert_eq!(message.attachments[2].kind, "unknown");
    }

    #[test]
    fn test_message_order_is_preserved() {
        let conversation = Conversation::from_value(json!({
            "chat_messages": [
                {"uuid": "b", "parent_message_uuid": "a", "sender": "assistant", "text": "2"},
                {"uuid": "a", "sender": "human", "text": "1"}
            ]
        }));

        let ids: Vec<_> = conversation
            .messages
            .iter()
            .map(|m| m.uuid.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_from_json_str_rejects_invalid_json() {
        assert!(matches!(
            Conversation::from_json_str("{not json"),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_from_path() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, r#"{{"uuid": "c-1", "name": "  Plans  ", "chat_messages": []}}"#)?;

        let conversation = Conversation::from_path(file.path())?;
        assert_eq!(conversation.uuid.as_deref(), Some("c-1"));
        assert_eq!(conversation.title(), "Plans");
        Ok(())
    }
}
