//! Nullable infrastructure for deterministic testing.
//!
//! The builder reaches chain state only through
//! [`pchain_wallet_core::BuilderBackend`]. This crate provides an in-memory
//! implementation that:
//! - Returns exactly what the test seeded, in seeding order
//! - Can be slowed down or made to fail programmatically
//! - Counts every call so tests can prove nothing was retried
//!
//! Usage: hand a `NullBackend` (or an `Arc` of one) to `Builder::new`.

pub mod backend;

pub use backend::NullBackend;
