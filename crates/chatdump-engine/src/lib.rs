// Conversion engine: pure functions from a captured conversation to text.
// No I/O, no shared state, never fails; malformed input degrades to
// placeholder output instead of errors.

pub mod bundle;
pub mod classify;
pub mod config;
pub mod content;
pub mod markdown;
pub mod outline;
pub mod text;
pub mod unwrap;
pub mod yaml;

pub use bundle::{Bundle, BundleFile, Encoding};
pub use classify::{BodyKind, classify_result_body};
pub use config::ExportConfig;
pub use unwrap::unwrap_tool_output;
pub use yaml::to_yaml;

use chatdump_types::Conversation;
use chrono::{DateTime, Utc};

// Façade API - stable interface for the CLI layer

/// Render a conversation as flat markdown, stamped with the current time
pub fn format_markdown(conversation: &Conversation, config: &ExportConfig) -> String {
    format_markdown_at(conversation, config, Utc::now())
}

pub fn format_markdown_at(
    conversation: &Conversation,
    config: &ExportConfig,
    exported_at: DateTime<Utc>,
) -> String {
    markdown::format_conversation_at(conversation, config, exported_at)
}

/// Render a conversation as outliner (`key:: value`) text
pub fn format_outline(conversation: &Conversation, config: &ExportConfig) -> String {
    format_outline_at(conversation, config, Utc::now())
}

pub fn format_outline_at(
    conversation: &Conversation,
    config: &ExportConfig,
    exported_at: DateTime<Utc>,
) -> String {
    outline::format_conversation_at(conversation, config, exported_at)
}

/// Markdown document plus the manifest of embedded files
pub fn build_bundle(conversation: &Conversation, config: &ExportConfig) -> Bundle {
    build_bundle_at(conversation, config, Utc::now())
}

pub fn build_bundle_at(
    conversation: &Conversation,
    config: &ExportConfig,
    exported_at: DateTime<Utc>,
) -> Bundle {
    bundle::build_bundle_at(conversation, config, exported_at)
}
