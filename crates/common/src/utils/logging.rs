use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Used when `RUST_LOG` is unset: request spans at info, store internals
/// (loads, writes) at debug.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=info,service::storage=debug";

/// How log lines are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// Single-line human output without targets.
    Compact,
    /// One JSON object per event, targets included.
    Json,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Calling this again is a no-op.
pub fn init_logging(style: LogStyle) {
    let registry = tracing_subscriber::registry().with(env_filter());
    let _ = match style {
        LogStyle::Compact => registry
            .with(fmt::layer().compact().with_target(false).with_writer(io::stdout))
            .try_init(),
        LogStyle::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(io::stdout))
            .try_init(),
    };
}
