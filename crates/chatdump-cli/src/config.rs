use crate::error::{Error, Result};
use chatdump_types::TruncationLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the config file path based on priority:
/// 1. Explicit path (`--config`, with tilde expansion)
/// 2. CHATDUMP_CONFIG environment variable (with tilde expansion)
/// 3. Platform config directory (recommended default)
/// 4. ~/.chatdump/config.toml (fallback for systems without one)
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(&path.to_string_lossy()));
    }

    // Priority 2: CHATDUMP_CONFIG environment variable
    if let Ok(env_path) = std::env::var("CHATDUMP_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: Platform config directory
    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("chatdump").join("config.toml"));
    }

    // Priority 4: ~/.chatdump
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".chatdump").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Character limits per content category; 0 disables truncation
    #[serde(default)]
    pub limits: TruncationLimits,
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
