//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised by the fundamental types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("u64 overflow: {a} + {b}")]
    Overflow { a: u64, b: u64 },

    #[error("u64 underflow: {a} - {b}")]
    Underflow { a: u64, b: u64 },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
