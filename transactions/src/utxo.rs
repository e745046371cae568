//! Unspent outputs as returned by a chain-state backend.

use pchain_types::Id;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::output::Output;

/// Names an output by the transaction that created it and its position.
///
/// Ordered by `(tx_id, output_index)`, the canonical input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtxoId {
    pub tx_id: Id,
    pub output_index: u32,
}

impl UtxoId {
    pub fn new(tx_id: Id, output_index: u32) -> Self {
        Self {
            tx_id,
            output_index,
        }
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_id, self.output_index)
    }
}

/// An unspent output. Never mutated; consumed whole by exactly one input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub utxo_id: UtxoId,
    pub asset_id: Id,
    pub out: Output,
}

impl Utxo {
    pub fn new(utxo_id: UtxoId, asset_id: Id, out: Output) -> Self {
        Self {
            utxo_id,
            asset_id,
            out,
        }
    }
}
