//! Add validator: stake the native asset to validate the primary network.

use serde::{Deserialize, Serialize};

use crate::base::BaseTx;
use crate::output::TransferableOutput;
use crate::owners::OutputOwners;
use crate::validator::Validator;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddValidatorTx {
    pub base: BaseTx,
    pub validator: Validator,
    /// Outputs locked for the validation period, summing to `validator.weight`.
    pub stake: Vec<TransferableOutput>,
    pub rewards_owner: OutputOwners,
    /// Fraction, out of 1,000,000, of delegation rewards kept by the validator.
    pub shares: u32,
}
