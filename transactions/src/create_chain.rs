//! Create chain: launch a new chain inside a subnet.

use pchain_types::Id;
use serde::{Deserialize, Serialize};

use crate::base::BaseTx;
use crate::input::Authorization;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChainTx {
    pub base: BaseTx,
    pub subnet_id: Id,
    /// Human readable name; not unique.
    pub chain_name: String,
    pub vm_id: Id,
    /// Feature extensions the VM runs with, sorted.
    pub fx_ids: Vec<Id>,
    pub genesis_data: Vec<u8>,
    pub subnet_auth: Authorization,
}
