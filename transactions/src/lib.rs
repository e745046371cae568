//! Unsigned platform-chain transactions and the components they are built
//! from.
//!
//! Transaction kinds:
//! - **AddValidator**: stake the native asset to validate the primary network
//! - **AddSubnetValidator**: add a node to a subnet's validator set
//! - **AddDelegator**: stake the native asset behind a validator
//! - **CreateChain**: launch a chain inside a subnet
//! - **CreateSubnet**: create a subnet governed by an owner
//! - **Import**: consume funds exported from another chain
//! - **Export**: send funds to another chain

pub mod add_delegator;
pub mod add_subnet_validator;
pub mod add_validator;
pub mod base;
pub mod codec;
pub mod create_chain;
pub mod create_subnet;
pub mod error;
pub mod export;
pub mod flow;
pub mod import;
pub mod input;
pub mod output;
pub mod owners;
pub mod utxo;
pub mod validator;

pub use add_delegator::AddDelegatorTx;
pub use add_subnet_validator::AddSubnetValidatorTx;
pub use add_validator::AddValidatorTx;
pub use base::BaseTx;
pub use create_chain::CreateChainTx;
pub use create_subnet::CreateSubnetTx;
pub use error::TransactionError;
pub use export::ExportTx;
pub use import::ImportTx;
pub use input::{Authorization, Input, StakeableLockIn, TransferInput, TransferableInput};
pub use output::{Output, StakeableLockOut, TransferOutput, TransferableOutput};
pub use owners::{Owner, OutputOwners};
pub use utxo::{Utxo, UtxoId};
pub use validator::{SubnetValidator, Validator};

use pchain_types::Id;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The unified unsigned transaction enum wrapping every kind the builder
/// produces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsignedTx {
    AddValidator(AddValidatorTx),
    AddSubnetValidator(AddSubnetValidatorTx),
    AddDelegator(AddDelegatorTx),
    CreateChain(CreateChainTx),
    CreateSubnet(CreateSubnetTx),
    Import(ImportTx),
    Export(ExportTx),
}

impl UnsignedTx {
    /// The shared base body.
    pub fn base(&self) -> &BaseTx {
        match self {
            Self::AddValidator(tx) => &tx.base,
            Self::AddSubnetValidator(tx) => &tx.base,
            Self::AddDelegator(tx) => &tx.base,
            Self::CreateChain(tx) => &tx.base,
            Self::CreateSubnet(tx) => &tx.base,
            Self::Import(tx) => &tx.base,
            Self::Export(tx) => &tx.base,
        }
    }

    /// Short kind name, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddValidator(_) => "add_validator",
            Self::AddSubnetValidator(_) => "add_subnet_validator",
            Self::AddDelegator(_) => "add_delegator",
            Self::CreateChain(_) => "create_chain",
            Self::CreateSubnet(_) => "create_subnet",
            Self::Import(_) => "import",
            Self::Export(_) => "export",
        }
    }

    /// Stake outputs, for the kinds that lock funds.
    pub fn stake_outputs(&self) -> &[TransferableOutput] {
        match self {
            Self::AddValidator(tx) => &tx.stake,
            Self::AddDelegator(tx) => &tx.stake,
            _ => &[],
        }
    }

    /// The bytes a signer hashes and signs.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        codec::canonical_bytes(self)
    }

    /// SHA-256 over [`UnsignedTx::canonical_bytes`].
    pub fn signing_hash(&self) -> Result<Id, TransactionError> {
        let bytes = self.canonical_bytes()?;
        let digest: [u8; 32] = Sha256::digest(&bytes).into();
        Ok(Id::new(digest))
    }
}

/// Signatures for one input or authorization, in `sig_indices` order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub signatures: Vec<Vec<u8>>,
}

/// A previously accepted transaction as returned by a chain-state lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTx {
    pub unsigned: UnsignedTx,
    pub credentials: Vec<Credential>,
}

impl SignedTx {
    pub fn new(unsigned: UnsignedTx) -> Self {
        Self {
            unsigned,
            credentials: Vec::new(),
        }
    }
}
