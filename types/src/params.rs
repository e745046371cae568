//! Static chain parameters a transaction builder needs.

use serde::{Deserialize, Serialize};

use crate::{Id, NetworkId};

/// Chain-wide constants supplied by the backend.
///
/// These do not change between build calls; fees are raw units of the
/// native asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainContext {
    pub network_id: NetworkId,
    /// The native staking asset; the only asset fees are paid in.
    pub native_asset_id: Id,
    /// Fee burned by import and export transactions.
    pub base_tx_fee: u64,
    /// Fee burned by subnet creation, chain creation and subnet validator
    /// registration.
    pub create_subnet_tx_fee: u64,
}
