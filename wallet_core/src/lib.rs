//! Wallet core library for the platform chain.
//!
//! Provides everything a wallet needs to turn an intent into an unsigned,
//! canonically ordered transaction:
//! - Output-owner matching against the controlled address set
//! - UTXO spend planning over locked and unlocked funds
//! - Subnet authorization resolution
//! - Transaction assembly for every platform-chain kind
//! - Build options, cancellation and TOML configuration

pub mod backend;
pub mod builder;
pub mod cancel;
pub mod config;
pub mod error;
pub mod matcher;
pub mod options;
pub mod spend;
pub mod subnet_auth;
pub mod tracing_spans;

pub use backend::{BackendError, BuilderBackend};
pub use builder::Builder;
pub use cancel::{CancelController, CancelToken};
pub use config::{ConfigError, WalletConfig};
pub use error::{BuildError, Shortfall};
pub use matcher::match_owners;
pub use options::BuildOptions;
pub use spend::{plan_spend, SpendPlan, SpendRequest};
