//! Outliner vocabulary: `key:: value` lines nested by indentation, two
//! spaces per level.

mod block;
mod message;

pub use block::{format_block, tool_summary};
pub use message::format_message;

use chatdump_types::Conversation;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::ExportConfig;
use crate::content::RenderContext;

/// Whole output for a conversation without messages
pub const EMPTY_CONVERSATION: &str = "export:: empty conversation";

/// Indented line buffer
#[derive(Debug, Default)]
pub struct Lines {
    lines: Vec<String>,
}

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, depth: usize, text: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", "  ".repeat(depth), text.as_ref()));
    }

    /// Push every non-blank line of `text` at `depth`
    pub fn push_text(&mut self, depth: usize, text: &str) {
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            self.push(depth, line.trim_end());
        }
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Render a conversation as outliner text, stamped with the given export time
pub fn format_conversation_at(
    conversation: &Conversation,
    config: &ExportConfig,
    exported_at: DateTime<Utc>,
) -> String {
    if conversation.is_empty() {
        return EMPTY_CONVERSATION.to_string();
    }

    let mut header = Lines::new();
    header.push(0, format!("export:: {}", conversation.title()));
    header.push(
        1,
        format!(
            "model:: {}",
            conversation.model.as_deref().unwrap_or("unknown")
        ),
    );
    header.push(1, format!("messages:: {}", conversation.messages.len()));
    header.push(
        1,
        format!(
            "exported:: {}",
            exported_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
    );
    header.push(
        1,
        format!("id:: {}", conversation.uuid.as_deref().unwrap_or("unknown")),
    );

    let ctx = RenderContext::new(conversation, config);
    let sections: Vec<String> = std::iter::once(header.finish())
        .chain(
            conversation
                .messages
                .iter()
                .map(|message| format_message(message, &ctx)),
        )
        .collect();

    sections.join("\n\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_empty_conversation_sentinel() {
        let conversation = Conversation::from_value(json!({"name": "nothing"}));
        assert_eq!(
            format_conversation_at(&conversation, &ExportConfig::default(), exported_at()),
            "export:: empty conversation"
        );
    }

    #[test]
    fn test_lines_skip_blank() {
        let mut lines = Lines::new();
        lines.push_text(1, "a\n\n  b  \n");
        assert_eq!(lines.finish(), "  a\n    b");
    }

    #[test]
    fn test_document_layout() {
        let conversation = Conversation::from_value(json!({
            "uuid": "conv-1",
            "name": "Fix the script",
            "model": "claude-test",
            "chat_messages": [
                {
                    "sender": "human",
                    "content": "Please fix run.sh\nIt fails on start",
                    "attachments": [{"file_name": "run.sh", "file_type": "text/x-sh"}]
                },
                {
                    "sender": "assistant",
                    "content": [
                        {"type": "thinking", "thinking": "Look at the file first.", "summaries": ["Reading"]},
                        {"type": "tool_use", "id": "t1", "name": "view", "input": {"path": "/w/run.sh"}},
                        {"type": "tool_result", "tool_use_id": "t1", "content": "#!/bin/sh\nexit 1"},
                        {"type": "text", "text": "The script exits early."}
                    ]
                }
            ]
        }));

        let out = format_conversation_at(&conversation, &ExportConfig::default(), exported_at());
        insta::assert_snapshot!(out.trim_end().to_string(), @r"
        export:: Fix the script
          model:: claude-test
          messages:: 2
          exported:: 2026-01-02T03:04:05Z
          id:: conv-1

        user:: Please fix run.sh
          It fails on start
          attachment:: run.sh (text/x-sh)

        response::
          thinking:: Look at the file first.
            Look at the file first.
            summary:: Reading
          tool:: view → /w/run.sh
            path:: /w/run.sh
          result:: view #!/bin/sh
            exit 1
          The script exits early.
        ");
    }
}
