use crate::input::read_conversation;
use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chatdump_engine::{BundleFile, Encoding, ExportConfig, build_bundle};
use log::{info, warn};
use std::path::Path;

const SLUG_MAX: usize = 60;

pub fn handle(input: &str, output_dir: &Path, config: &ExportConfig) -> Result<()> {
    let conversation = read_conversation(input)?;
    let bundle = build_bundle(&conversation, config);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let doc_path = output_dir.join(format!("{}.md", slug(conversation.title())));
    std::fs::write(&doc_path, &bundle.markdown)
        .with_context(|| format!("Failed to write {}", doc_path.display()))?;

    let mut written = 0;
    for file in &bundle.files {
        let bytes = match decode(file) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("skipping {}: invalid base64 payload ({})", file.path, err);
                continue;
            }
        };

        let target = output_dir.join(&file.path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&target, bytes)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        written += 1;
    }

    info!(
        "bundle written to {} ({} of {} files)",
        output_dir.display(),
        written,
        bundle.files.len()
    );
    println!("{}", doc_path.display());
    Ok(())
}

/// Raw bytes of a manifest entry
pub(crate) fn decode(file: &BundleFile) -> Result<Vec<u8>, base64::DecodeError> {
    match file.encoding {
        Encoding::Text => Ok(file.data.as_bytes().to_vec()),
        Encoding::Base64 => {
            let compact: String = file.data.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD.decode(compact)
        }
    }
}

/// File-name slug for a conversation title
pub(crate) fn slug(title: &str) -> String {
    let mut out = String::new();
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }

    out.truncate(SLUG_MAX);
    let out = out.trim_end_matches('-');
    if out.is_empty() {
        "conversation".to_string()
    } else {
        out.to_string()
    }
}
