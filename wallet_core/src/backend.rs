//! Read-only chain-state access consumed by the builder.

use std::future::Future;
use std::sync::Arc;

use pchain_transactions::{SignedTx, Utxo};
use pchain_types::{ChainContext, Id};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

/// Everything the builder reads from the chain.
///
/// Implementations must tolerate concurrent calls from several builds.
/// Dropping a returned future must abort the underlying request; the
/// builder relies on that to honour cancellation and timeouts.
pub trait BuilderBackend: Send + Sync {
    /// Static chain parameters.
    fn context(&self) -> &ChainContext;

    /// The unspent outputs of `chain_id` the wallet might spend, in the
    /// order the builder will visit them.
    fn utxos(&self, chain_id: Id) -> impl Future<Output = Result<Vec<Utxo>, BackendError>> + Send;

    /// A previously accepted transaction.
    fn get_tx(&self, tx_id: Id) -> impl Future<Output = Result<SignedTx, BackendError>> + Send;
}

impl<T: BuilderBackend> BuilderBackend for Arc<T> {
    fn context(&self) -> &ChainContext {
        (**self).context()
    }

    fn utxos(&self, chain_id: Id) -> impl Future<Output = Result<Vec<Utxo>, BackendError>> + Send {
        (**self).utxos(chain_id)
    }

    fn get_tx(&self, tx_id: Id) -> impl Future<Output = Result<SignedTx, BackendError>> + Send {
        (**self).get_tx(tx_id)
    }
}
