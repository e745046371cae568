//! Add delegator: stake the native asset behind an existing validator.

use serde::{Deserialize, Serialize};

use crate::base::BaseTx;
use crate::output::TransferableOutput;
use crate::owners::OutputOwners;
use crate::validator::Validator;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDelegatorTx {
    pub base: BaseTx,
    pub validator: Validator,
    pub stake: Vec<TransferableOutput>,
    pub rewards_owner: OutputOwners,
}
