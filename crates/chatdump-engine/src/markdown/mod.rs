//! Flat markdown vocabulary.

mod block;
mod message;

pub use block::{format_block, is_rich_field};
pub use message::format_message;

use chatdump_types::Conversation;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::ExportConfig;
use crate::content::RenderContext;

/// Whole output for a conversation without messages
pub const EMPTY_CONVERSATION: &str = "<!-- empty conversation -->";

const MESSAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Render a conversation as markdown, stamped with the given export time
pub fn format_conversation_at(
    conversation: &Conversation,
    config: &ExportConfig,
    exported_at: DateTime<Utc>,
) -> String {
    if conversation.is_empty() {
        return EMPTY_CONVERSATION.to_string();
    }

    let ctx = RenderContext::new(conversation, config);
    let messages = conversation
        .messages
        .iter()
        .map(|message| format_message(message, &ctx))
        .collect::<Vec<_>>()
        .join(MESSAGE_SEPARATOR);

    format!(
        "{}\n\n# {}\n\n{}\n",
        header(conversation, config, exported_at),
        conversation.title(),
        messages
    )
}

fn header(conversation: &Conversation, config: &ExportConfig, exported_at: DateTime<Utc>) -> String {
    [
        format!("<!-- {} -->", config.tool_version),
        format!(
            "<!-- id: {} -->",
            conversation.uuid.as_deref().unwrap_or("unknown")
        ),
        format!(
            "<!-- exported: {} -->",
            exported_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        format!(
            "<!-- model: {} | messages: {} -->",
            conversation.model.as_deref().unwrap_or("unknown"),
            conversation.messages.len()
        ),
    ]
    .join("\n")
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
        let conversation = Conversation::from_value(json!({"uuid": "x", "chat_messages": []}));
        assert_eq!(
            format_conversation_at(&conversation, &ExportConfig::default(), exported_at()),
            EMPTY_CONVERSATION
        );
    }

    #[test]
    fn test_document_layout() {
        let conversation = Conversation::from_value(json!({
            "uuid": "conv-1",
            "name": "Greeting",
            "model": "claude-test",
            "chat_messages": [
                {"sender": "human", "content": "Hi"},
                {"sender": "assistant", "content": [{"type": "text", "text": "Hello!"}]}
            ]
        }));
        let config = ExportConfig {
            tool_version: "chatdump test".to_string(),
            ..ExportConfig::default()
        };

        let out = format_conversation_at(&conversation, &config, exported_at());
        insta::assert_snapshot!(out.trim_end().to_string(), @r"
        <!-- chatdump test -->
        <!-- id: conv-1 -->
        <!-- exported: 2026-01-02T03:04:05Z -->
        <!-- model: claude-test | messages: 2 -->

        # Greeting

        ## Human

        Hi

        ---

        ## Assistant

        Hello!
        ");
    }

    #[test]
    fn test_tool_result_name_resolved_from_tool_use() {
        let conversation = Conversation::from_value(json!({
            "chat_messages": [{
                "sender": "assistant",
                "content": [
                    {"type": "tool_use", "id": "t1", "name": "search", "input": {"query": "x"}},
                    {"type": "tool_result", "tool_use_id": "t1", "content": "found"}
                ]
            }]
        }));
        let out = format_conversation_at(&conversation, &ExportConfig::default(), exported_at());
        assert!(out.contains("### Tool Result (search)\n\n```\nfound\n```"));
        assert!(out.contains("# Untitled conversation"));
        assert!(out.contains("<!-- id: unknown -->"));
    }
}
