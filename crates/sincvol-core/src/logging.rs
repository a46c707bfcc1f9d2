//! Structured logging bootstrap via the `tracing` ecosystem
//!
//! One `init_logging` call at startup wires a fmt subscriber with an
//! env-filter. `RUST_LOG` always wins over the configured level, so a run
//! can be made chatty without touching the config file. Source locations
//! are on by default because fatal reports are expected to carry file and
//! line.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (overridden by `RUST_LOG` when set)
    pub level: LogLevel,
    /// Include timestamps
    pub timestamps: bool,
    /// Include source location (file:line)
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            timestamps: true,
            source_location: true,
        }
    }
}

/// Initialize the global subscriber. Safe to call more than once; only the
/// first call takes effect.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    if config.timestamps {
        let _ = builder.try_init();
    } else {
        let _ = builder.without_time().try_init();
    }
}
