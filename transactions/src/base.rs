//! Fields shared by every platform-chain transaction.

use pchain_types::{Id, NetworkId};
use serde::{Deserialize, Serialize};

use crate::input::TransferableInput;
use crate::output::TransferableOutput;

/// The common body: where the transaction is valid, what it spends, and what
/// it returns as change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseTx {
    pub network_id: NetworkId,
    /// Always the platform chain for the kinds built here.
    pub blockchain_id: Id,
    pub inputs: Vec<TransferableInput>,
    pub outputs: Vec<TransferableOutput>,
    pub memo: Vec<u8>,
}
