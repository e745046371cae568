//! Network identifier and well-known chain ids.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Id;

/// The platform chain's id. Every transaction built here targets it.
pub const PLATFORM_CHAIN_ID: Id = Id::EMPTY;

/// Identifies which network a transaction is valid on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkId(u32);

impl NetworkId {
    /// The production network.
    pub const MAINNET: Self = Self(1);
    /// The public test network.
    pub const TESTNET: Self = Self(5);
    /// Local development network.
    pub const LOCAL: Self = Self(12345);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self.0 {
            1 => "mainnet",
            5 => "testnet",
            12345 => "local",
            _ => "custom",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.as_str(), self.0)
    }
}
