use super::write_output;
use crate::input::read_conversation;
use anyhow::Result;
use chatdump_engine::{ExportConfig, format_outline};
use std::path::Path;

pub fn handle(input: &str, output: Option<&Path>, config: &ExportConfig) -> Result<()> {
    let conversation = read_conversation(input)?;
    write_output(output, &format_outline(&conversation, config))
}
