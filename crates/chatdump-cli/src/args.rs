use crate::types::LogLevel;
use chatdump_types::{Limit, TruncationLimits};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chatdump")]
#[command(about = "Convert captured chat conversations to markdown, outliner text and bundles", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Config file (defaults to CHATDUMP_CONFIG, then the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a conversation as flat markdown
    Markdown {
        /// Captured conversation JSON, or `-` for stdin
        input: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Render a conversation as outliner (`key:: value`) text
    Outline {
        /// Captured conversation JSON, or `-` for stdin
        input: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Write the markdown document and every embedded file into a directory
    Bundle {
        /// Captured conversation JSON, or `-` for stdin
        input: String,

        /// Target directory (created if missing)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Print the bundle file manifest as JSON without writing anything
    Manifest {
        /// Captured conversation JSON, or `-` for stdin
        input: String,
    },

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved config file path
    Path,
}

/// Per-invocation truncation overrides; 0 disables truncation
#[derive(Args, Debug, Clone, Default)]
pub struct LimitArgs {
    #[arg(long, value_name = "CHARS")]
    pub limit_tool_use_meta: Option<usize>,

    #[arg(long, value_name = "CHARS")]
    pub limit_tool_use_content: Option<usize>,

    #[arg(long, value_name = "CHARS")]
    pub limit_tool_result: Option<usize>,

    #[arg(long, value_name = "CHARS")]
    pub limit_thinking: Option<usize>,

    /// Disable all truncation
    #[arg(long)]
    pub no_truncate: bool,
}

impl LimitArgs {
    /// Apply overrides on top of configured limits
    pub fn apply(&self, limits: TruncationLimits) -> TruncationLimits {
        if self.no_truncate {
            return TruncationLimits::unlimited();
        }

        let pick = |arg: Option<usize>, current: Limit| arg.map(Limit::from).unwrap_or(current);
        TruncationLimits {
            tool_use_meta: pick(self.limit_tool_use_meta, limits.tool_use_meta),
            tool_use_content: pick(self.limit_tool_use_content, limits.tool_use_content),
            tool_result: pick(self.limit_tool_result, limits.tool_result),
            thinking: pick(self.limit_thinking, limits.thinking),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_limit_overrides() {
        let args = LimitArgs {
            limit_tool_result: Some(50),
            limit_thinking: Some(0),
            ..LimitArgs::default()
        };
        let limits = args.apply(TruncationLimits::default());

        assert_eq!(limits.tool_result, Limit::Chars(50));
        assert_eq!(limits.thinking, Limit::Unlimited);
        assert_eq!(limits.tool_use_meta, Limit::Chars(2000));
    }

    #[test]
    fn test_no_truncate() {
        let args = LimitArgs {
            no_truncate: true,
            limit_tool_result: Some(50),
            ..LimitArgs::default()
        };
        assert_eq!(
            args.apply(TruncationLimits::default()),
            TruncationLimits::unlimited()
        );
    }

    #[test]
    fn test_parse_markdown_command() {
        let cli = Cli::parse_from([
            "chatdump",
            "--log-level",
            "debug",
            "markdown",
            "conv.json",
            "-o",
            "out.md",
            "--limit-tool-result",
            "100",
        ]);

        assert_eq!(cli.log_level, LogLevel::Debug);
        match cli.command {
            Commands::Markdown {
                input,
                output,
                limits,
            } => {
                assert_eq!(input, "conv.json");
                assert_eq!(output, Some(PathBuf::from("out.md")));
                assert_eq!(limits.limit_tool_result, Some(100));
            }
            _ => panic!("expected markdown command"),
        }
    }
}
