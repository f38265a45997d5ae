//! Logging and request-tracing config

use clap::{Args, ValueEnum};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Single-line human-readable output
    #[default]
    Compact,

    /// One JSON object per event, including the current span
    Json,
}

#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it when set
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,
}

#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Requests slower than this many milliseconds are logged at `warn`
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}
