//! Subnet authorization: which of our addresses can sign for a subnet.

use pchain_transactions::{Authorization, Owner, OutputOwners, SignedTx, UnsignedTx};
use pchain_types::Id;
use tracing::{debug, Instrument};

use crate::backend::BuilderBackend;
use crate::builder::Builder;
use crate::error::BuildError;
use crate::matcher::match_owners;
use crate::options::BuildOptions;
use crate::tracing_spans::backend_span;

/// The owner recorded by the transaction that created `subnet_id`.
pub fn subnet_owner(subnet_id: Id, tx: &SignedTx) -> Result<&OutputOwners, BuildError> {
    let UnsignedTx::CreateSubnet(create) = &tx.unsigned else {
        return Err(BuildError::WrongTxType {
            tx_id: subnet_id,
            found: tx.unsigned.kind(),
        });
    };
    match &create.owner {
        Owner::Addresses(owners) => Ok(owners),
        Owner::Opaque { .. } => Err(BuildError::UnknownOwnerType { subnet_id }),
    }
}

impl<B: BuilderBackend> Builder<B> {
    /// Signature indices proving control of `subnet_id`.
    ///
    /// The subnet owner's time lock is judged against the options'
    /// minimum issuance time.
    pub async fn authorize_subnet(
        &self,
        subnet_id: Id,
        options: &BuildOptions,
    ) -> Result<Authorization, BuildError> {
        let tx = options
            .guard(
                self.backend
                    .get_tx(subnet_id)
                    .instrument(backend_span("get_tx", &subnet_id)),
            )
            .await?
            .map_err(|source| BuildError::TxLookup {
                tx_id: subnet_id,
                source,
            })?;

        let owners = subnet_owner(subnet_id, &tx)?;
        let sig_indices = match_owners(&self.addrs, owners, options.min_issuance_time)
            .ok_or(BuildError::InsufficientAuthorization { subnet_id })?;
        debug!(subnet = %subnet_id, signers = sig_indices.len(), "subnet authorized");
        Ok(Authorization::new(sig_indices))
    }
}
