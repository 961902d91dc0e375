use chatdump_types::{Message, MessageContent, Sender};

use super::block::format_block;
use crate::content::RenderContext;

/// Render one conversation turn: sender heading, body, attachment bullets
pub fn format_message(message: &Message, ctx: &RenderContext<'_>) -> String {
    let heading = match message.sender {
        Sender::Human => "## Human",
        Sender::Assistant => "## Assistant",
    };

    let body = match &message.content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Blocks(blocks) => blocks
            .iter()
            .filter_map(|block| format_block(block, ctx))
            .filter(|rendered| !rendered.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
        MessageContent::Absent => message.text.clone().unwrap_or_default(),
    };

    let mut sections = vec![heading.to_string()];
    if !body.trim().is_empty() {
        sections.push(body.trim_end().to_string());
    }

    if !message.attachments.is_empty() {
        let bullets = message
            .attachments
            .iter()
            .map(|attachment| format!("- {} ({})", attachment.name, attachment.kind))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(bullets);
    }

    sections.join("\n\n")
}
