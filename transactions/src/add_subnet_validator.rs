//! Add subnet validator: register a node on a subnet, authorized by the
//! subnet's owner.

use serde::{Deserialize, Serialize};

use crate::base::BaseTx;
use crate::input::Authorization;
use crate::validator::SubnetValidator;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSubnetValidatorTx {
    pub base: BaseTx,
    pub validator: SubnetValidator,
    pub subnet_auth: Authorization,
}
