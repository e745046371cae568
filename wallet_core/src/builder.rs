//! Transaction assembly for every platform-chain kind.
//!
//! Each `new_*_tx` method turns an intent into a [`SpendRequest`], plans the
//! spend over the platform chain's UTXOs, resolves subnet authorization when
//! the kind needs it, and returns the unsigned transaction with every list in
//! canonical order. A call either returns a complete transaction or one
//! [`BuildError`]; nothing is retried.

use std::cmp::Ordering;

use pchain_transactions::{
    codec, AddDelegatorTx, AddSubnetValidatorTx, AddValidatorTx, BaseTx, CreateChainTx,
    CreateSubnetTx, ExportTx, ImportTx, Input, Output, OutputOwners, Owner, SubnetValidator,
    TransferInput, TransferableInput, TransferableOutput, UnsignedTx, Utxo, Validator,
};
use pchain_types::{amount, AddressSet, Id, PLATFORM_CHAIN_ID};
use tracing::{debug, Instrument};

use crate::backend::BuilderBackend;
use crate::error::{BuildError, Shortfall};
use crate::matcher::match_owners;
use crate::options::BuildOptions;
use crate::spend::{plan_spend, SpendPlan, SpendRequest};
use crate::tracing_spans::{backend_span, build_span};

/// Builds unsigned transactions for the addresses it controls.
///
/// The address set is fixed at construction. A `Builder` holds no other
/// state, so concurrent builds on one instance are independent as long as
/// the backend tolerates concurrent reads.
#[derive(Debug, Clone)]
pub struct Builder<B> {
    pub(crate) addrs: AddressSet,
    pub(crate) backend: B,
}

impl<B: BuilderBackend> Builder<B> {
    pub fn new(addrs: AddressSet, backend: B) -> Self {
        Self { addrs, backend }
    }

    pub fn addresses(&self) -> &AddressSet {
        &self.addrs
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Owner for change outputs: the override, or threshold 1 over the
    /// smallest controlled address. An empty address set always fails.
    fn change_owner(&self, options: &BuildOptions) -> Result<OutputOwners, BuildError> {
        let addr = self.addrs.peek().ok_or(BuildError::NoChangeAddress)?;
        Ok(options
            .change_owner
            .clone()
            .unwrap_or_else(|| OutputOwners::single(addr)))
    }

    async fn fetch_utxos(
        &self,
        chain_id: Id,
        options: &BuildOptions,
    ) -> Result<Vec<Utxo>, BuildError> {
        options
            .guard(
                self.backend
                    .utxos(chain_id)
                    .instrument(backend_span("utxos", &chain_id)),
            )
            .await?
            .map_err(|source| BuildError::UtxoLookup { chain_id, source })
    }

    async fn spend(
        &self,
        request: SpendRequest,
        options: &BuildOptions,
    ) -> Result<SpendPlan, BuildError> {
        let change_owner = self.change_owner(options)?;
        let utxos = self.fetch_utxos(PLATFORM_CHAIN_ID, options).await?;
        plan_spend(
            &utxos,
            request,
            &self.addrs,
            &change_owner,
            options.min_issuance_time,
        )
    }

    fn base_tx(
        &self,
        inputs: Vec<TransferableInput>,
        outputs: Vec<TransferableOutput>,
        options: &BuildOptions,
    ) -> BaseTx {
        BaseTx {
            network_id: self.backend.context().network_id,
            blockchain_id: PLATFORM_CHAIN_ID,
            inputs,
            outputs,
            memo: options.memo.clone(),
        }
    }

    /// Stake `validator.weight` of the native asset to validate the primary
    /// network.
    pub async fn new_add_validator_tx(
        &self,
        validator: Validator,
        mut rewards_owner: OutputOwners,
        shares: u32,
        options: &BuildOptions,
    ) -> Result<UnsignedTx, BuildError> {
        async {
            let native = self.backend.context().native_asset_id;
            let request = SpendRequest::new().stake(native, validator.weight)?;
            let plan = self.spend(request, options).await?;

            rewards_owner.sort_addresses();
            let tx = UnsignedTx::AddValidator(AddValidatorTx {
                base: self.base_tx(plan.inputs, plan.change_outputs, options),
                validator,
                stake: plan.stake_outputs,
                rewards_owner,
                shares,
            });
            built(&tx);
            Ok::<_, BuildError>(tx)
        }
        .instrument(build_span("add_validator"))
        .await
    }

    /// Add a node to a subnet's validator set, paying the subnet fee.
    pub async fn new_add_subnet_validator_tx(
        &self,
        validator: SubnetValidator,
        options: &BuildOptions,
    ) -> Result<UnsignedTx, BuildError> {
        async {
            let ctx = self.backend.context();
            let request =
                SpendRequest::new().burn(ctx.native_asset_id, ctx.create_subnet_tx_fee)?;
            let plan = self.spend(request, options).await?;
            let subnet_auth = self.authorize_subnet(validator.subnet_id, options).await?;

            let tx = UnsignedTx::AddSubnetValidator(AddSubnetValidatorTx {
                base: self.base_tx(plan.inputs, plan.change_outputs, options),
                validator,
                subnet_auth,
            });
            built(&tx);
            Ok::<_, BuildError>(tx)
        }
        .instrument(build_span("add_subnet_validator"))
        .await
    }

    /// Stake `validator.weight` of the native asset behind an existing
    /// validator.
    pub async fn new_add_delegator_tx(
        &self,
        validator: Validator,
        mut rewards_owner: OutputOwners,
        options: &BuildOptions,
    ) -> Result<UnsignedTx, BuildError> {
        async {
            let native = self.backend.context().native_asset_id;
            let request = SpendRequest::new().stake(native, validator.weight)?;
            let plan = self.spend(request, options).await?;

            rewards_owner.sort_addresses();
            let tx = UnsignedTx::AddDelegator(AddDelegatorTx {
                base: self.base_tx(plan.inputs, plan.change_outputs, options),
                validator,
                stake: plan.stake_outputs,
                rewards_owner,
            });
            built(&tx);
            Ok::<_, BuildError>(tx)
        }
        .instrument(build_span("add_delegator"))
        .await
    }

    /// Launch a chain inside `subnet_id`.
    pub async fn new_create_chain_tx(
        &self,
        subnet_id: Id,
        genesis: Vec<u8>,
        vm_id: Id,
        mut fx_ids: Vec<Id>,
        chain_name: String,
        options: &BuildOptions,
    ) -> Result<UnsignedTx, BuildError> {
        async {
            let ctx = self.backend.context();
            let request =
                SpendRequest::new().burn(ctx.native_asset_id, ctx.create_subnet_tx_fee)?;
            let plan = self.spend(request, options).await?;
            let subnet_auth = self.authorize_subnet(subnet_id, options).await?;

            fx_ids.sort_unstable();
            let tx = UnsignedTx::CreateChain(CreateChainTx {
                base: self.base_tx(plan.inputs, plan.change_outputs, options),
                subnet_id,
                chain_name,
                vm_id,
                fx_ids,
                genesis_data: genesis,
                subnet_auth,
            });
            built(&tx);
            Ok::<_, BuildError>(tx)
        }
        .instrument(build_span("create_chain"))
        .await
    }

    /// Create a subnet governed by `owner`.
    pub async fn new_create_subnet_tx(
        &self,
        mut owner: OutputOwners,
        options: &BuildOptions,
    ) -> Result<UnsignedTx, BuildError> {
        async {
            let ctx = self.backend.context();
            let request =
                SpendRequest::new().burn(ctx.native_asset_id, ctx.create_subnet_tx_fee)?;
            let plan = self.spend(request, options).await?;

            owner.sort_addresses();
            let tx = UnsignedTx::CreateSubnet(CreateSubnetTx {
                base: self.base_tx(plan.inputs, plan.change_outputs, options),
                owner: Owner::Addresses(owner),
            });
            built(&tx);
            Ok::<_, BuildError>(tx)
        }
        .instrument(build_span("create_subnet"))
        .await
    }

    /// Import native funds exported to the platform chain from
    /// `source_chain`.
    ///
    /// Imported funds pay the base fee first. A shortfall is burned from
    /// local funds; a surplus returns to the change owner as one output.
    pub async fn new_import_tx(
        &self,
        source_chain: Id,
        options: &BuildOptions,
    ) -> Result<UnsignedTx, BuildError> {
        async {
            let ctx = self.backend.context();
            let native = ctx.native_asset_id;
            let fee = ctx.base_tx_fee;
            let change_owner = self.change_owner(options)?;
            let utxos = self.fetch_utxos(source_chain, options).await?;

            let mut imported_inputs = Vec::new();
            let mut imported_amount = 0u64;
            for utxo in &utxos {
                if utxo.asset_id != native {
                    continue;
                }
                let Output::Transfer(out) = &utxo.out else {
                    continue;
                };
                let Some(sig_indices) =
                    match_owners(&self.addrs, &out.owners, options.min_issuance_time)
                else {
                    continue;
                };
                imported_amount = amount::add(imported_amount, out.amount)?;
                imported_inputs.push(TransferableInput {
                    utxo_id: utxo.utxo_id,
                    asset_id: utxo.asset_id,
                    input: Input::Transfer(TransferInput::new(out.amount, sig_indices)),
                });
            }
            if imported_inputs.is_empty() {
                return Err(BuildError::InsufficientFunds(Shortfall::NothingToImport {
                    source_chain,
                }));
            }
            codec::sort_inputs(&mut imported_inputs);
            debug!(
                chain = %source_chain,
                count = imported_inputs.len(),
                amount = imported_amount,
                "collected importable utxos"
            );

            let (inputs, outputs) = match imported_amount.cmp(&fee) {
                Ordering::Less => {
                    let request = SpendRequest::new().burn(native, fee - imported_amount)?;
                    let plan = self.spend(request, options).await?;
                    (plan.inputs, plan.change_outputs)
                }
                Ordering::Greater => {
                    let surplus = TransferableOutput::transfer(
                        native,
                        imported_amount - fee,
                        change_owner,
                    );
                    (Vec::new(), vec![surplus])
                }
                Ordering::Equal => (Vec::new(), Vec::new()),
            };

            let tx = UnsignedTx::Import(ImportTx {
                base: self.base_tx(inputs, outputs, options),
                source_chain,
                imported_inputs,
            });
            built(&tx);
            Ok::<_, BuildError>(tx)
        }
        .instrument(build_span("import"))
        .await
    }

    /// Export `outputs` to `destination_chain`.
    ///
    /// Burns the base fee plus every exported amount, per asset.
    pub async fn new_export_tx(
        &self,
        destination_chain: Id,
        mut outputs: Vec<TransferableOutput>,
        options: &BuildOptions,
    ) -> Result<UnsignedTx, BuildError> {
        async {
            let ctx = self.backend.context();
            let mut request = SpendRequest::new().burn(ctx.native_asset_id, ctx.base_tx_fee)?;
            for (index, out) in outputs.iter().enumerate() {
                let value = out
                    .amount()
                    .ok_or(BuildError::UnsupportedExportOutput { index })?;
                request = request.burn(out.asset_id, value)?;
            }
            let plan = self.spend(request, options).await?;

            codec::sort_outputs(&mut outputs)?;
            let tx = UnsignedTx::Export(ExportTx {
                base: self.base_tx(plan.inputs, plan.change_outputs, options),
                destination_chain,
                exported_outputs: outputs,
            });
            built(&tx);
            Ok::<_, BuildError>(tx)
        }
        .instrument(build_span("export"))
        .await
    }
}

fn built(tx: &UnsignedTx) {
    let base = tx.base();
    debug!(
        kind = tx.kind(),
        inputs = base.inputs.len(),
        outputs = base.outputs.len(),
        stake = tx.stake_outputs().len(),
        "built transaction"
    );
}
