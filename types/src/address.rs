//! 20-byte addresses, node ids, and the controlled-address set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::TypesError;

fn parse_short(s: &str) -> Result<[u8; 20], TypesError> {
    let raw = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(raw).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| TypesError::InvalidLength {
            expected: 20,
            got: bytes.len(),
        })
}

/// A key address that may or may not be controlled by the wallet.
///
/// Derived off-chain from a public key; this crate only ever compares and
/// orders addresses, it never derives them.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a 40-character hex string, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        parse_short(s).map(Self)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Identifies a validator node.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId([u8; 20]);

impl NodeId {
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        parse_short(s).map(Self)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeID-{}", hex::encode(self.0))
    }
}

/// The set of addresses a wallet can sign for.
///
/// Membership is order-independent, but iteration is always ascending so the
/// change-address pick ([`AddressSet::peek`]) is the same on every machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSet(BTreeSet<Address>);

impl AddressSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, addr: Address) -> bool {
        self.0.insert(addr)
    }

    pub fn contains(&self, addr: &Address) -> bool {
        self.0.contains(addr)
    }

    /// The fixed change-address pick: the smallest controlled address.
    pub fn peek(&self) -> Option<Address> {
        self.0.first().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.0.iter()
    }
}

impl FromIterator<Address> for AddressSet {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Address; N]> for AddressSet {
    fn from(addrs: [Address; N]) -> Self {
        addrs.into_iter().collect()
    }
}
