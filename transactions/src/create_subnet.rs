//! Create subnet: a new validator set governed by `owner`.

use serde::{Deserialize, Serialize};

use crate::base::BaseTx;
use crate::owners::Owner;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubnetTx {
    pub base: BaseTx,
    /// Who may add validators and chains to the subnet.
    pub owner: Owner,
}
