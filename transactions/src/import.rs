//! Import: pull native funds exported to the platform chain from another
//! chain.

use pchain_types::Id;
use serde::{Deserialize, Serialize};

use crate::base::BaseTx;
use crate::input::TransferableInput;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTx {
    pub base: BaseTx,
    pub source_chain: Id,
    /// Inputs consuming UTXOs held in shared memory with `source_chain`.
    pub imported_inputs: Vec<TransferableInput>,
}
