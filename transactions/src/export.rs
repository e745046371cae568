//! Export: move funds from the platform chain to another chain.

use pchain_types::Id;
use serde::{Deserialize, Serialize};

use crate::base::BaseTx;
use crate::output::TransferableOutput;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTx {
    pub base: BaseTx,
    pub destination_chain: Id,
    /// Outputs created in shared memory with `destination_chain`.
    pub exported_outputs: Vec<TransferableOutput>,
}
