//! Threshold-of-N address ownership.

use pchain_types::Address;
use serde::{Deserialize, Serialize};

use crate::codec::is_sorted_and_unique;
use crate::error::TransactionError;

/// Authorization requirement attached to an output or a subnet.
///
/// Satisfied when at least `threshold` of `addresses` sign and the issuance
/// time has reached `locktime`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputOwners {
    pub locktime: u64,
    pub threshold: u32,
    pub addresses: Vec<Address>,
}

impl OutputOwners {
    pub fn new(locktime: u64, threshold: u32, addresses: Vec<Address>) -> Self {
        Self {
            locktime,
            threshold,
            addresses,
        }
    }

    /// A threshold-1, unlocked owner over a single address.
    pub fn single(addr: Address) -> Self {
        Self {
            locktime: 0,
            threshold: 1,
            addresses: vec![addr],
        }
    }

    pub fn sort_addresses(&mut self) {
        self.addresses.sort();
    }

    /// Structural checks: spendable threshold, no wasted addresses, canonical
    /// address order.
    pub fn verify(&self) -> Result<(), TransactionError> {
        if self.threshold as usize > self.addresses.len() {
            return Err(TransactionError::InvalidOwners(format!(
                "threshold {} exceeds {} addresses",
                self.threshold,
                self.addresses.len()
            )));
        }
        if self.threshold == 0 && !self.addresses.is_empty() {
            return Err(TransactionError::InvalidOwners(
                "zero threshold with non-empty address list".into(),
            ));
        }
        if !is_sorted_and_unique(&self.addresses) {
            return Err(TransactionError::InvalidOwners(
                "addresses not sorted and unique".into(),
            ));
        }
        Ok(())
    }
}

/// The owner of a subnet (or any other owned object).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// Threshold address ownership, the only shape this engine can satisfy.
    Addresses(OutputOwners),
    /// An owner registered by a feature extension this engine does not know.
    Opaque { type_id: u32, payload: Vec<u8> },
}

impl From<OutputOwners> for Owner {
    fn from(owners: OutputOwners) -> Self {
        Self::Addresses(owners)
    }
}
