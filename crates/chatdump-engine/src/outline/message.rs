use chatdump_types::{Message, MessageContent, Sender};

use super::Lines;
use super::block::format_block;
use crate::content::RenderContext;
use crate::text::take_chars;

const USER_LINE_MAX: usize = 120;

/// Render one conversation turn as outliner lines
pub fn format_message(message: &Message, ctx: &RenderContext<'_>) -> String {
    let mut out = Lines::new();
    match message.sender {
        Sender::Human => format_human(message, &mut out),
        Sender::Assistant => format_assistant(message, ctx, &mut out),
    }
    out.finish()
}

fn format_human(message: &Message, out: &mut Lines) {
    let text = message.plain_text();
    let text = text.trim();
    let mut lines = text.lines();

    let first = lines.next().unwrap_or("").trim_end();
    let head = take_chars(first, USER_LINE_MAX);
    if head.is_empty() {
        out.push(0, "user::");
    } else {
        out.push(0, format!("user:: {}", head));
    }

    let rest: Vec<&str> = lines.collect();
    out.push_text(1, &rest.join("\n"));

    for attachment in &message.attachments {
        out.push(
            1,
            format!("attachment:: {} ({})", attachment.name, attachment.kind),
        );
    }
}

fn format_assistant(message: &Message, ctx: &RenderContext<'_>, out: &mut Lines) {
    out.push(0, "response::");
    match &message.content {
        MessageContent::Text(text) => out.push_text(1, text),
        MessageContent::Blocks(blocks) => {
            for block in blocks {
                format_block(block, 0, ctx, out);
            }
        }
        MessageContent::Absent => out.push_text(1, message.text.as_deref().unwrap_or("")),
    }

    for attachment in &message.attachments {
        out.push(
            1,
            format!("attachment:: {} ({})", attachment.name, attachment.kind),
        );
    }
}
