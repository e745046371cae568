//! Output shapes: plain transfers and stake-locked transfers.

use pchain_types::Id;
use serde::{Deserialize, Serialize};

use crate::owners::OutputOwners;

/// An amount of some asset owned by an [`OutputOwners`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferOutput {
    pub amount: u64,
    pub owners: OutputOwners,
}

impl TransferOutput {
    pub fn new(amount: u64, owners: OutputOwners) -> Self {
        Self { amount, owners }
    }
}

/// An output that stays locked into staking until `locktime`.
///
/// The wrapped output is expected to be a [`Output::Transfer`]; anything else
/// is a shape this engine refuses to spend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StakeableLockOut {
    pub locktime: u64,
    pub transferable_out: Box<Output>,
}

impl StakeableLockOut {
    pub fn new(locktime: u64, out: TransferOutput) -> Self {
        Self {
            locktime,
            transferable_out: Box::new(Output::Transfer(out)),
        }
    }

    /// The wrapped transfer, if the payload has the recognised shape.
    pub fn transfer(&self) -> Option<&TransferOutput> {
        match self.transferable_out.as_ref() {
            Output::Transfer(out) => Some(out),
            _ => None,
        }
    }
}

/// Every output payload the codec can carry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Output {
    Transfer(TransferOutput),
    StakeableLock(StakeableLockOut),
    /// A payload registered by a feature extension this engine does not know.
    Opaque { type_id: u32, payload: Vec<u8> },
}

impl Output {
    /// The carried amount, for shapes that carry one.
    pub fn amount(&self) -> Option<u64> {
        match self {
            Self::Transfer(out) => Some(out.amount),
            Self::StakeableLock(locked) => locked.transfer().map(|out| out.amount),
            Self::Opaque { .. } => None,
        }
    }

    pub fn is_stake_locked(&self) -> bool {
        matches!(self, Self::StakeableLock(_))
    }
}

/// An output tagged with the asset it carries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferableOutput {
    pub asset_id: Id,
    pub out: Output,
}

impl TransferableOutput {
    /// A plain transfer of `amount` units of `asset_id`.
    pub fn transfer(asset_id: Id, amount: u64, owners: OutputOwners) -> Self {
        Self {
            asset_id,
            out: Output::Transfer(TransferOutput::new(amount, owners)),
        }
    }

    /// A transfer of `amount` units that stays locked until `locktime`.
    pub fn stake_locked(asset_id: Id, locktime: u64, amount: u64, owners: OutputOwners) -> Self {
        Self {
            asset_id,
            out: Output::StakeableLock(StakeableLockOut::new(
                locktime,
                TransferOutput::new(amount, owners),
            )),
        }
    }

    pub fn amount(&self) -> Option<u64> {
        self.out.amount()
    }
}
