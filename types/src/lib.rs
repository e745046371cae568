//! Fundamental types for platform-chain transaction building.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! identifiers, addresses, the controlled-address set, timestamps, network and
//! chain parameters, and overflow-checked amount arithmetic.

pub mod address;
pub mod amount;
pub mod error;
pub mod id;
pub mod network;
pub mod params;
pub mod time;

pub use address::{Address, AddressSet, NodeId};
pub use error::TypesError;
pub use id::Id;
pub use network::{NetworkId, PLATFORM_CHAIN_ID};
pub use params::ChainContext;
pub use time::Timestamp;
