//! Validation period descriptors.

use pchain_types::{Id, NodeId};
use serde::{Deserialize, Serialize};

/// A staking period on the primary network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub node_id: NodeId,
    /// Unix seconds.
    pub start: u64,
    /// Unix seconds.
    pub end: u64,
    /// Stake weight for primary-network validators and delegators, sampling
    /// weight for subnet validators.
    pub weight: u64,
}

/// A validation period on a subnet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetValidator {
    pub validator: Validator,
    pub subnet_id: Id,
}
