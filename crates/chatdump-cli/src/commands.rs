use super::args::{Cli, Commands, ConfigCommand, LimitArgs};
use super::handlers;
use crate::config::{Config, resolve_config_path};
use crate::logging;
use anyhow::{Context, Result};
use chatdump_engine::ExportConfig;
use log::debug;
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config_path = resolve_config_path(cli.config.as_deref())?;
    debug!("config path: {}", config_path.display());

    match cli.command {
        Commands::Markdown {
            input,
            output,
            limits,
        } => {
            let export = export_config(&config_path, &limits)?;
            handlers::markdown::handle(&input, output.as_deref(), &export)
        }

        Commands::Outline {
            input,
            output,
            limits,
        } => {
            let export = export_config(&config_path, &limits)?;
            handlers::outline::handle(&input, output.as_deref(), &export)
        }

        Commands::Bundle {
            input,
            output,
            limits,
        } => {
            let export = export_config(&config_path, &limits)?;
            handlers::bundle::handle(&input, &output, &export)
        }

        Commands::Manifest { input } => handlers::manifest::handle(&input),

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&config_path),
            ConfigCommand::Init { force } => handlers::config::init(&config_path, force),
            ConfigCommand::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
        },
    }
}

fn export_config(config_path: &Path, overrides: &LimitArgs) -> Result<ExportConfig> {
    let config = Config::load_from(config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?;
    let limits = overrides.apply(config.limits);
    debug!("effective limits: {:?}", limits);
    Ok(ExportConfig::with_limits(limits))
}
