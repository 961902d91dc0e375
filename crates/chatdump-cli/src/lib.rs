// chatdump CLI
//
// Thin shell around chatdump-engine: read a captured conversation, pick a
// formatter, write the result. All rendering decisions live in the engine;
// this crate only owns I/O, configuration and logging.

mod args;
mod commands;
pub mod config;
pub mod error;
mod handlers;
mod input;
mod logging;
pub mod types;

pub use args::{Cli, Commands, ConfigCommand, LimitArgs};
pub use commands::run;
