//! 32-byte identifiers for transactions, assets, chains and subnets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// A 32-byte identifier.
///
/// The same shape names transactions, assets, chains, subnets, VMs and
/// feature extensions. Ordering is lexicographic over the raw bytes, which is
/// the order every canonical id list is sorted by.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Id([u8; 32]);

impl Id {
    pub const LEN: usize = 32;
    pub const EMPTY: Self = Self([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse a 64-character hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| TypesError::InvalidLength {
                expected: Self::LEN,
                got: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl From<[u8; 32]> for Id {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Id {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
