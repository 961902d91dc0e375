use serde::Serialize;
use serde_json::{Map, Value};

use crate::value::str_field;

/// Kind of a referenced file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Text,
    Document,
    Other(String),
}

impl FileKind {
    fn parse(kind: &str) -> Self {
        match kind {
            "image" => FileKind::Image,
            "text" => FileKind::Text,
            "document" => FileKind::Document,
            other => FileKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FileKind::Image => "image",
            FileKind::Text => "text",
            FileKind::Document => "document",
            FileKind::Other(kind) => kind,
        }
    }
}

/// Payload embedded upstream, before the conversation reaches the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "encoding", content = "data", rename_all = "snake_case")]
pub enum EmbeddedPayload {
    Text(String),
    Base64(String),
}

/// A file referenced from a tool input, tool result or attachment.
///
/// The capture layer embeds file bytes as `embedded_text` or
/// `embedded_base64`; the engine only reads those fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub kind: FileKind,
    pub media_type: Option<String>,
    pub payload: EmbeddedPayload,
}

impl FileRef {
    /// Decode a file reference from a JSON object.
    ///
    /// Returns `None` unless the object carries an embedded payload.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().and_then(Self::from_object)
    }

    pub(crate) fn from_object(obj: &Map<String, Value>) -> Option<Self> {
        let payload = if let Some(data) = str_field(obj, &["embedded_base64"]) {
            EmbeddedPayload::Base64(data)
        } else {
            EmbeddedPayload::Text(str_field(obj, &["embedded_text"])?)
        };

        let media_type = str_field(obj, &["media_type", "mime_type"]);
        let kind = match str_field(obj, &["file_kind", "kind"]) {
            Some(kind) => FileKind::parse(&kind),
            None => infer_kind(media_type.as_deref(), &payload),
        };

        Some(Self {
            id: str_field(obj, &["file_uuid", "uuid", "id"]),
            name: str_field(obj, &["file_name", "name"]),
            kind,
            media_type,
            payload,
        })
    }
}

fn infer_kind(media_type: Option<&str>, payload: &EmbeddedPayload) -> FileKind {
    match (media_type, payload) {
        (Some(mt), _) if mt.starts_with("image/") => FileKind::Image,
        (_, EmbeddedPayload::Text(_)) => FileKind::Text,
        _ => FileKind::Document,
    }
}
