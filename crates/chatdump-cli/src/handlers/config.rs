use crate::config::Config;
use anyhow::{Context, Result};
use std::path::Path;

pub fn show(config_path: &Path) -> Result<()> {
    let config = Config::load_from(config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists: {} (use --force to overwrite)",
            config_path.display()
        );
    }

    Config::default()
        .save_to(config_path)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
    println!("Wrote {}", config_path.display());
    Ok(())
}
