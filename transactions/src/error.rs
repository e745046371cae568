use pchain_types::{Id, TypesError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("codec error: {0}")]
    Codec(String),

    #[error("amount overflow: {0}")]
    Overflow(#[from] TypesError),

    #[error("asset {asset_id} produces {produced} but only consumes {consumed}")]
    ProducesMoreThanConsumed {
        asset_id: Id,
        consumed: u64,
        produced: u64,
    },

    #[error("{0} are not in canonical order")]
    NotSorted(&'static str),

    #[error("invalid output owners: {0}")]
    InvalidOwners(String),
}
