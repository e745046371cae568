//! Shared utilities for the platform-chain wallet workspace.

pub mod logging;

pub use logging::{init_logging, init_tracing, try_init_logging, LogFormat, LoggingError};
