//! Bundle assembly: the markdown document plus a manifest of embedded files.
//!
//! The engine never decodes or writes anything here. Payloads are copied
//! verbatim from the conversation, tagged with their encoding, and given a
//! unique relative path under `files/`.

use chatdump_types::{Block, Conversation, EmbeddedPayload, FileRef, ToolResultContent};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::config::ExportConfig;
use crate::markdown;

const FILES_DIR: &str = "files";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Base64,
    Text,
}

impl Encoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Base64 => "base64",
            Encoding::Text => "text",
        }
    }
}

/// One file to archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleFile {
    /// Relative path inside the archive, always under `files/`
    pub path: String,
    pub encoding: Encoding,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

/// A markdown document paired with the files it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bundle {
    pub markdown: String,
    pub files: Vec<BundleFile>,
}

/// Build the bundle for a conversation, stamped with the given export time
pub fn build_bundle_at(
    conversation: &Conversation,
    config: &ExportConfig,
    exported_at: DateTime<Utc>,
) -> Bundle {
    let files = collect_files(conversation);
    let mut markdown = markdown::format_conversation_at(conversation, config, exported_at);

    if !files.is_empty() {
        let listing = files
            .iter()
            .map(|file| format!("- `{}`", file.path))
            .collect::<Vec<_>>()
            .join("\n");
        markdown = format!(
            "{}\n\n---\n\n## Files\n\n{}\n",
            markdown.trim_end(),
            listing
        );
    }

    Bundle { markdown, files }
}

/// Collect every embedded file in presentation order
pub fn collect_files(conversation: &Conversation) -> Vec<BundleFile> {
    let mut collector = Collector::default();

    for message in &conversation.messages {
        for block in message.blocks() {
            match block {
                Block::ToolUse(tool) => collector.scan(&tool.input),
                Block::ToolResult(result) => match &result.content {
                    ToolResultContent::Parts(parts) => parts.iter().for_each(|p| collector.scan(p)),
                    ToolResultContent::Other(value) => collector.scan(value),
                    ToolResultContent::Text(_) | ToolResultContent::Absent => {}
                },
                _ => {}
            }
        }

        for attachment in &message.attachments {
            if let Some(file) = &attachment.file {
                collector.add_ref(file, Some(&attachment.name));
            } else if let Some(text) = &attachment.extracted_content {
                collector.add(
                    None,
                    Some(&attachment.name),
                    "text",
                    None,
                    Encoding::Text,
                    text.clone(),
                );
            }
        }
    }

    collector.files
}

#[derive(Default)]
struct Collector {
    files: Vec<BundleFile>,
    seen_ids: HashSet<String>,
    used_paths: HashSet<String>,
    unnamed: usize,
}

impl Collector {
    fn scan(&mut self, value: &Value) {
        match value {
            Value::Object(obj) => {
                if let Some(file) = FileRef::from_value(value) {
                    self.add_ref(&file, None);
                } else if let Some((media_type, data)) = base64_image_source(value) {
                    self.add(None, None, "image", media_type, Encoding::Base64, data);
                } else {
                    obj.values().for_each(|v| self.scan(v));
                }
            }
            Value::Array(items) => items.iter().for_each(|v| self.scan(v)),
            _ => {}
        }
    }

    fn add_ref(&mut self, file: &FileRef, fallback_name: Option<&str>) {
        let (encoding, data) = match &file.payload {
            EmbeddedPayload::Base64(data) => (Encoding::Base64, data.clone()),
            EmbeddedPayload::Text(data) => (Encoding::Text, data.clone()),
        };
        self.add(
            file.id.as_deref(),
            file.name.as_deref().or(fallback_name),
            file.kind.as_str(),
            file.media_type.as_deref(),
            encoding,
            data,
        );
    }

    fn add(
        &mut self,
        id: Option<&str>,
        name: Option<&str>,
        kind: &str,
        media_type: Option<&str>,
        encoding: Encoding,
        data: String,
    ) {
        if let Some(id) = id
            && !self.seen_ids.insert(id.to_string())
        {
            debug!("bundle: skipping duplicate file {}", id);
            return;
        }

        let file_name = match name.map(sanitize_file_name).filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => {
                self.unnamed += 1;
                format!(
                    "{}-{}.{}",
                    sanitize_file_name(kind),
                    self.unnamed,
                    extension_for(media_type, encoding)
                )
            }
        };

        let path = self.unique_path(&file_name);
        self.files.push(BundleFile {
            path,
            encoding,
            data,
            media_type: media_type.map(str::to_string),
        });
    }

    fn unique_path(&mut self, file_name: &str) -> String {
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (file_name, None),
        };

        let mut candidate = format!("{}/{}", FILES_DIR, file_name);
        let mut n = 1;
        while self.used_paths.contains(&candidate) {
            n += 1;
            candidate = match ext {
                Some(ext) => format!("{}/{}-{}.{}", FILES_DIR, stem, n, ext),
                None => format!("{}/{}-{}", FILES_DIR, stem, n),
            };
        }

        self.used_paths.insert(candidate.clone());
        candidate
    }
}

/// `(media_type, data)` of an image sub-block with an inline base64 source
fn base64_image_source(value: &Value) -> Option<(Option<&str>, String)> {
    if value.get("type").and_then(Value::as_str) != Some("image") {
        return None;
    }
    let source = value.get("source")?;
    if source.get("type").and_then(Value::as_str) != Some("base64") {
        return None;
    }
    let data = source.get("data").and_then(Value::as_str)?;
    Some((
        source.get("media_type").and_then(Value::as_str),
        data.to_string(),
    ))
}

/// File name safe to use as one path component
pub fn sanitize_file_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

fn extension_for(media_type: Option<&str>, encoding: Encoding) -> &'static str {
    match media_type {
        Some("image/png") => "png",
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        Some("image/svg+xml") => "svg",
        Some("application/pdf") => "pdf",
        Some("application/json") => "json",
        Some("text/markdown") => "md",
        Some("text/csv") => "csv",
        Some("text/html") => "html",
        Some("text/plain") => "txt",
        _ => match encoding {
            Encoding::Base64 => "bin",
            Encoding::Text => "txt",
        },
    }
}
