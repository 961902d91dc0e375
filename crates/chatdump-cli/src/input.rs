use anyhow::{Context, Result};
use chatdump_types::Conversation;
use log::info;
use std::io::Read;
use std::path::Path;

/// Read a captured conversation from a file path, or stdin for `-`
pub fn read_conversation(input: &str) -> Result<Conversation> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read conversation from stdin")?;
        buf
    } else {
        let path = Path::new(input);
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read conversation: {}", path.display()))?
    };

    let conversation = Conversation::from_json_str(&content)
        .with_context(|| format!("Invalid conversation JSON: {}", input))?;

    info!(
        "loaded conversation {} with {} messages",
        conversation.uuid.as_deref().unwrap_or("(no id)"),
        conversation.messages.len()
    );
    Ok(conversation)
}
