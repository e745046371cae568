//! Input shapes that spend a UTXO.

use pchain_types::Id;
use serde::{Deserialize, Serialize};

use crate::utxo::UtxoId;

/// Positions in an owner's address list that will sign.
///
/// Also used as the subnet authorization placeholder: the signer later
/// attaches one signature per index, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Authorization {
    pub sig_indices: Vec<u32>,
}

impl Authorization {
    pub fn new(sig_indices: Vec<u32>) -> Self {
        Self { sig_indices }
    }
}

/// Spends the full amount of a plain transfer output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferInput {
    pub amount: u64,
    pub auth: Authorization,
}

impl TransferInput {
    pub fn new(amount: u64, sig_indices: Vec<u32>) -> Self {
        Self {
            amount,
            auth: Authorization::new(sig_indices),
        }
    }
}

/// Spends a stake-locked output while its lock is still active.
///
/// `locktime` repeats the consumed output's lock unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StakeableLockIn {
    pub locktime: u64,
    pub transferable_in: TransferInput,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Input {
    Transfer(TransferInput),
    StakeableLock(StakeableLockIn),
}

impl Input {
    pub fn amount(&self) -> u64 {
        match self {
            Self::Transfer(input) => input.amount,
            Self::StakeableLock(locked) => locked.transferable_in.amount,
        }
    }

    pub fn sig_indices(&self) -> &[u32] {
        match self {
            Self::Transfer(input) => &input.auth.sig_indices,
            Self::StakeableLock(locked) => &locked.transferable_in.auth.sig_indices,
        }
    }
}

/// An input tagged with the UTXO it consumes and that UTXO's asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferableInput {
    pub utxo_id: UtxoId,
    pub asset_id: Id,
    pub input: Input,
}

impl TransferableInput {
    pub fn amount(&self) -> u64 {
        self.input.amount()
    }
}
