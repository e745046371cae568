//! Flow checks: per-asset conservation and canonical ordering.
//!
//! These are stateless self-checks over a built transaction. They do not
//! consult chain state and are not consensus validation.

use std::collections::BTreeMap;

use pchain_types::{amount, Id};

use crate::codec::{inputs_are_sorted, is_sorted_and_unique, outputs_are_sorted};
use crate::error::TransactionError;
use crate::input::TransferableInput;
use crate::output::TransferableOutput;
use crate::owners::Owner;
use crate::UnsignedTx;

fn consumed_inputs(tx: &UnsignedTx) -> Vec<&TransferableInput> {
    let mut inputs: Vec<_> = tx.base().inputs.iter().collect();
    if let UnsignedTx::Import(import) = tx {
        inputs.extend(import.imported_inputs.iter());
    }
    inputs
}

fn produced_outputs(tx: &UnsignedTx) -> Vec<&TransferableOutput> {
    let mut outputs: Vec<_> = tx.base().outputs.iter().collect();
    outputs.extend(tx.stake_outputs().iter());
    if let UnsignedTx::Export(export) = tx {
        outputs.extend(export.exported_outputs.iter());
    }
    outputs
}

fn add_to(map: &mut BTreeMap<Id, u64>, asset_id: Id, value: u64) -> Result<(), TransactionError> {
    let entry = map.entry(asset_id).or_insert(0);
    *entry = amount::add(*entry, value)?;
    Ok(())
}

/// Amount of each asset the transaction destroys: consumed minus produced.
///
/// Assets that are consumed and produced in equal measure map to zero.
pub fn burned_amounts(tx: &UnsignedTx) -> Result<BTreeMap<Id, u64>, TransactionError> {
    let mut consumed = BTreeMap::new();
    for input in consumed_inputs(tx) {
        add_to(&mut consumed, input.asset_id, input.amount())?;
    }

    let mut produced = BTreeMap::new();
    for output in produced_outputs(tx) {
        // Shapes without an amount carry no value.
        add_to(&mut produced, output.asset_id, output.amount().unwrap_or(0))?;
    }

    let mut burned = BTreeMap::new();
    for (asset_id, &out) in &produced {
        let inp = consumed.get(asset_id).copied().unwrap_or(0);
        if out > inp {
            return Err(TransactionError::ProducesMoreThanConsumed {
                asset_id: *asset_id,
                consumed: inp,
                produced: out,
            });
        }
    }
    for (asset_id, inp) in consumed {
        let out = produced.get(&asset_id).copied().unwrap_or(0);
        burned.insert(asset_id, amount::sub(inp, out)?);
    }
    Ok(burned)
}

/// Check every ordering a signer relies on.
pub fn verify_canonical(tx: &UnsignedTx) -> Result<(), TransactionError> {
    let base = tx.base();
    if !inputs_are_sorted(&base.inputs) {
        return Err(TransactionError::NotSorted("inputs"));
    }
    if !outputs_are_sorted(&base.outputs)? {
        return Err(TransactionError::NotSorted("outputs"));
    }

    match tx {
        UnsignedTx::AddValidator(tx) => {
            if !outputs_are_sorted(&tx.stake)? {
                return Err(TransactionError::NotSorted("stake outputs"));
            }
            if !is_sorted_and_unique(&tx.rewards_owner.addresses) {
                return Err(TransactionError::NotSorted("reward owner addresses"));
            }
        }
        UnsignedTx::AddDelegator(tx) => {
            if !outputs_are_sorted(&tx.stake)? {
                return Err(TransactionError::NotSorted("stake outputs"));
            }
            if !is_sorted_and_unique(&tx.rewards_owner.addresses) {
                return Err(TransactionError::NotSorted("reward owner addresses"));
            }
        }
        UnsignedTx::CreateChain(tx) => {
            if !is_sorted_and_unique(&tx.fx_ids) {
                return Err(TransactionError::NotSorted("feature extension ids"));
            }
        }
        UnsignedTx::CreateSubnet(tx) => {
            if let Owner::Addresses(owners) = &tx.owner {
                if !is_sorted_and_unique(&owners.addresses) {
                    return Err(TransactionError::NotSorted("subnet owner addresses"));
                }
            }
        }
        UnsignedTx::Import(tx) => {
            if !inputs_are_sorted(&tx.imported_inputs) {
                return Err(TransactionError::NotSorted("imported inputs"));
            }
        }
        UnsignedTx::Export(tx) => {
            if !outputs_are_sorted(&tx.exported_outputs)? {
                return Err(TransactionError::NotSorted("exported outputs"));
            }
        }
        UnsignedTx::AddSubnetValidator(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::BaseTx;
    use crate::export::ExportTx;
    use crate::import::ImportTx;
    use crate::input::{Input, TransferInput};
    use crate::owners::OutputOwners;
    use crate::utxo::UtxoId;
    use pchain_types::{Address, NetworkId, PLATFORM_CHAIN_ID};

    const NATIVE: Id = Id::new([1u8; 32]);
    const OTHER: Id = Id::new([2u8; 32]);

    fn owner() -> OutputOwners {
        OutputOwners::single(Address::new([5u8; 20]))
    }

    fn input(tx: u8, asset_id: Id, amount: u64) -> TransferableInput {
        TransferableInput {
            utxo_id: UtxoId::new(Id::new([tx; 32]), 0),
            asset_id,
            input: Input::Transfer(TransferInput::new(amount, vec![0])),
        }
    }

    fn base(inputs: Vec<TransferableInput>, outputs: Vec<TransferableOutput>) -> BaseTx {
        BaseTx {
            network_id: NetworkId::LOCAL,
            blockchain_id: PLATFORM_CHAIN_ID,
            inputs,
            outputs,
            memo: vec![],
        }
    }

    #[test]
    fn export_burns_fee_and_moves_exported_value() {
        let tx = UnsignedTx::Export(ExportTx {
            base: base(
                vec![input(1, NATIVE, 515), input(2, OTHER, 500)],
                vec![TransferableOutput::transfer(NATIVE, 505, owner())],
            ),
            destination_chain: Id::new([9u8; 32]),
            exported_outputs: vec![TransferableOutput::transfer(OTHER, 500, owner())],
        });
        let burned = burned_amounts(&tx).unwrap();
        assert_eq!(burned.get(&NATIVE), Some(&10));
        assert_eq!(burned.get(&OTHER), Some(&0));
    }

    #[test]
    fn import_counts_imported_inputs() {
        let tx = UnsignedTx::Import(ImportTx {
            base: base(vec![input(1, NATIVE, 10)], vec![
                TransferableOutput::transfer(NATIVE, 4, owner()),
            ]),
            source_chain: Id::new([9u8; 32]),
            imported_inputs: vec![input(3, NATIVE, 4)],
        });
        assert_eq!(burned_amounts(&tx).unwrap().get(&NATIVE), Some(&10));
    }

    #[test]
    fn overproduction_is_rejected() {
        let tx = UnsignedTx::Export(ExportTx {
            base: base(vec![input(1, NATIVE, 5)], vec![]),
            destination_chain: Id::new([9u8; 32]),
            exported_outputs: vec![TransferableOutput::transfer(NATIVE, 6, owner())],
        });
        assert_eq!(
            burned_amounts(&tx),
            Err(TransactionError::ProducesMoreThanConsumed {
                asset_id: NATIVE,
                consumed: 5,
                produced: 6,
            })
        );
    }

    #[test]
    fn consumed_overflow_is_detected() {
        let tx = UnsignedTx::Export(ExportTx {
            base: base(vec![input(1, NATIVE, u64::MAX), input(2, NATIVE, 1)], vec![]),
            destination_chain: Id::new([9u8; 32]),
            exported_outputs: vec![],
        });
        assert!(matches!(
            burned_amounts(&tx),
            Err(TransactionError::Overflow(_))
        ));
    }

    #[test]
    fn unsorted_inputs_are_not_canonical() {
        let tx = UnsignedTx::Export(ExportTx {
            base: base(vec![input(2, NATIVE, 1), input(1, NATIVE, 1)], vec![]),
            destination_chain: Id::new([9u8; 32]),
            exported_outputs: vec![],
        });
        assert_eq!(
            verify_canonical(&tx),
            Err(TransactionError::NotSorted("inputs"))
        );
    }

    #[test]
    fn unsorted_exported_outputs_are_not_canonical() {
        let tx = UnsignedTx::Export(ExportTx {
            base: base(vec![], vec![]),
            destination_chain: Id::new([9u8; 32]),
            exported_outputs: vec![
                TransferableOutput::transfer(OTHER, 1, owner()),
                TransferableOutput::transfer(NATIVE, 1, owner()),
            ],
        });
        assert_eq!(
            verify_canonical(&tx),
            Err(TransactionError::NotSorted("exported outputs"))
        );
    }
}
