//! Structured logging initialisation via `tracing`.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`]: readable lines for local use.
//! - [`LogFormat::Json`]: newline-delimited JSON for log pipelines.
//!
//! `RUST_LOG` overrides the caller-supplied level when set.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unknown log format: {0} (expected \"human\" or \"json\")")]
    UnknownFormat(String),

    #[error("failed to install subscriber: {0}")]
    Install(String),
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber, reporting failure instead of panicking.
pub fn try_init_logging(format: LogFormat, level: &str) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(filter(level));
    let result = match format {
        LogFormat::Human => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init(),
    };
    result.map_err(|e| LoggingError::Install(e.to_string()))
}

/// Initialise the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging(format: LogFormat, level: &str) {
    if let Err(e) = try_init_logging(format, level) {
        panic!("{e}");
    }
}

/// Minimal subscriber driven only by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
