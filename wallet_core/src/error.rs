use std::fmt;
use std::time::Duration;

use pchain_transactions::{TransactionError, UtxoId};
use pchain_types::{Id, TypesError};
use thiserror::Error;

use crate::backend::BackendError;

/// Which requirement a build could not fund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shortfall {
    /// `amount` more units of `asset_id` were needed to burn.
    Burn { asset_id: Id, amount: u64 },
    /// `amount` more units of `asset_id` were needed to stake.
    Stake { asset_id: Id, amount: u64 },
    /// No spendable native UTXOs were found on the source chain.
    NothingToImport { source_chain: Id },
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Burn { asset_id, amount } => write!(
                f,
                "provided UTXOs need {amount} more units of asset {asset_id}"
            ),
            Self::Stake { asset_id, amount } => write!(
                f,
                "provided UTXOs need {amount} more units of asset {asset_id} to stake"
            ),
            Self::NothingToImport { source_chain } => {
                write!(f, "no UTXOs available to import from chain {source_chain}")
            }
        }
    }
}

/// Every way a build call can fail. No variant is retried internally.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no possible change address")]
    NoChangeAddress,

    #[error("insufficient funds: {0}")]
    InsufficientFunds(Shortfall),

    #[error("insufficient authorization for subnet {subnet_id}")]
    InsufficientAuthorization { subnet_id: Id },

    #[error("wrong tx type: {tx_id} is a {found} transaction, expected create_subnet")]
    WrongTxType { tx_id: Id, found: &'static str },

    #[error("unknown owner type for subnet {subnet_id}")]
    UnknownOwnerType { subnet_id: Id },

    #[error("unknown output type in utxo {utxo_id}")]
    UnknownOutputType { utxo_id: UtxoId },

    #[error("exported output {index} carries no amount")]
    UnsupportedExportOutput { index: usize },

    #[error("failed to fetch UTXOs of chain {chain_id}: {source}")]
    UtxoLookup {
        chain_id: Id,
        #[source]
        source: BackendError,
    },

    #[error("failed to fetch subnet {tx_id}: {source}")]
    TxLookup {
        tx_id: Id,
        #[source]
        source: BackendError,
    },

    #[error("build cancelled")]
    Cancelled,

    #[error("backend call timed out after {after:?}")]
    TimedOut { after: Duration },

    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] TypesError),

    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),
}

impl BuildError {
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::InsufficientFunds(_))
    }

    /// Whether the call was aborted rather than rejected.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled | Self::TimedOut { .. })
    }
}
