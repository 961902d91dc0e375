//! Conversation model for chatdump.
//!
//! Captured conversations arrive as loosely-typed JSON. Every type here is
//! decoded through an infallible shape check: unexpected field types are
//! treated as absent instead of rejecting the whole capture.

pub mod block;
pub mod conversation;
pub mod error;
pub mod file_ref;
pub mod limits;
mod value;

pub use block::{Block, SummaryFragment, Thinking, ToolResult, ToolResultContent, ToolUse};
pub use conversation::{Attachment, Conversation, Message, MessageContent, Sender};
pub use error::{Error, Result};
pub use file_ref::{EmbeddedPayload, FileKind, FileRef};
pub use limits::{Limit, TruncationLimits};
