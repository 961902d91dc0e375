use env_logger::{Builder, Env, Target};

use crate::types::LogLevel;

/// Install the stderr logger. `RUST_LOG`, when set, overrides `level`.
pub fn init(level: LogLevel) {
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init();
}
