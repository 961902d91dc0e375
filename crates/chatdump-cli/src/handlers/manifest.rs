use super::bundle::decode;
use crate::input::read_conversation;
use anyhow::Result;
use chatdump_engine::bundle::collect_files;
use serde::Serialize;

#[derive(Serialize)]
struct ManifestEntry<'a> {
    path: &'a str,
    encoding: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    media_type: Option<&'a str>,
    /// Decoded size in bytes; absent when the payload does not decode
    size: Option<usize>,
}

pub fn handle(input: &str) -> Result<()> {
    let conversation = read_conversation(input)?;
    let files = collect_files(&conversation);

    let entries: Vec<ManifestEntry> = files
        .iter()
        .map(|file| ManifestEntry {
            path: &file.path,
            encoding: file.encoding.as_str(),
            media_type: file.media_type.as_deref(),
            size: decode(file).ok().map(|bytes| bytes.len()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
