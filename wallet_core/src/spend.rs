//! UTXO spend planning.
//!
//! Two passes over the UTXO set, in backend order:
//!
//! 1. Stake-locked UTXOs whose lock is still active fund stake requirements.
//!    They are spent into new stake-locked outputs with the same owners and
//!    lock; any surplus stays locked as change.
//! 2. Every other spendable UTXO (unlocked, or locked but matured) funds the
//!    remaining burn requirement first, then the remaining stake requirement,
//!    and returns the rest as unlocked change.
//!
//! Every requirement must reach exactly zero or the plan fails.

use std::collections::BTreeMap;

use pchain_transactions::{
    codec, Input, Output, OutputOwners, StakeableLockIn, TransferInput, TransferOutput,
    TransferableInput, TransferableOutput, Utxo,
};
use pchain_types::{amount, AddressSet, Id, Timestamp, TypesError};
use tracing::{debug, trace};

use crate::error::{BuildError, Shortfall};
use crate::matcher::match_owners;

/// Per-asset amounts a transaction must burn and stake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendRequest {
    pub amounts_to_burn: BTreeMap<Id, u64>,
    pub amounts_to_stake: BTreeMap<Id, u64>,
}

impl SpendRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` units of `asset_id` to burn.
    pub fn burn(mut self, asset_id: Id, value: u64) -> Result<Self, TypesError> {
        let entry = self.amounts_to_burn.entry(asset_id).or_insert(0);
        *entry = amount::add(*entry, value)?;
        Ok(self)
    }

    /// Add `value` units of `asset_id` to stake.
    pub fn stake(mut self, asset_id: Id, value: u64) -> Result<Self, TypesError> {
        let entry = self.amounts_to_stake.entry(asset_id).or_insert(0);
        *entry = amount::add(*entry, value)?;
        Ok(self)
    }
}

/// Inputs and outputs that satisfy a [`SpendRequest`], canonically sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendPlan {
    pub inputs: Vec<TransferableInput>,
    pub change_outputs: Vec<TransferableOutput>,
    pub stake_outputs: Vec<TransferableOutput>,
}

fn remaining(map: &BTreeMap<Id, u64>, asset_id: &Id) -> u64 {
    map.get(asset_id).copied().unwrap_or(0)
}

fn consume(map: &mut BTreeMap<Id, u64>, asset_id: &Id, used: u64) {
    if let Some(left) = map.get_mut(asset_id) {
        *left -= used;
    }
}

/// Plan a spend over `utxos`.
///
/// `utxos` are visited in the given order; nothing is reordered before
/// consumption. A UTXO whose owners the wallet cannot satisfy is skipped. A
/// UTXO with an unrecognised output shape aborts the plan with
/// [`BuildError::UnknownOutputType`].
pub fn plan_spend(
    utxos: &[Utxo],
    request: SpendRequest,
    addrs: &AddressSet,
    change_owner: &OutputOwners,
    min_issuance_time: Timestamp,
) -> Result<SpendPlan, BuildError> {
    let SpendRequest {
        amounts_to_burn: mut to_burn,
        amounts_to_stake: mut to_stake,
    } = request;
    let mut plan = SpendPlan::default();

    // Pass 1: locked UTXOs fund stake only.
    for utxo in utxos {
        let asset_id = utxo.asset_id;
        let remaining_stake = remaining(&to_stake, &asset_id);
        if remaining_stake == 0 {
            continue;
        }

        let Output::StakeableLock(locked) = &utxo.out else {
            continue;
        };
        if min_issuance_time.has_reached(locked.locktime) {
            // Matured; spent as unlocked funds in pass 2.
            continue;
        }

        let out = locked.transfer().ok_or(BuildError::UnknownOutputType {
            utxo_id: utxo.utxo_id,
        })?;
        let Some(sig_indices) = match_owners(addrs, &out.owners, min_issuance_time) else {
            trace!(utxo = %utxo.utxo_id, "skipping locked utxo: owners not satisfied");
            continue;
        };

        plan.inputs.push(TransferableInput {
            utxo_id: utxo.utxo_id,
            asset_id,
            input: Input::StakeableLock(StakeableLockIn {
                locktime: locked.locktime,
                transferable_in: TransferInput::new(out.amount, sig_indices),
            }),
        });

        let amount_to_stake = remaining_stake.min(out.amount);
        if amount_to_stake > 0 {
            plan.stake_outputs.push(TransferableOutput::stake_locked(
                asset_id,
                locked.locktime,
                amount_to_stake,
                out.owners.clone(),
            ));
        }
        consume(&mut to_stake, &asset_id, amount_to_stake);

        let change = out.amount - amount_to_stake;
        if change > 0 {
            plan.change_outputs.push(TransferableOutput::stake_locked(
                asset_id,
                locked.locktime,
                change,
                out.owners.clone(),
            ));
        }
        debug!(
            utxo = %utxo.utxo_id,
            amount = out.amount,
            staked = amount_to_stake,
            locktime = locked.locktime,
            "consumed locked utxo"
        );
    }

    // Pass 2: unlocked and matured UTXOs fund burn, then stake.
    for utxo in utxos {
        let asset_id = utxo.asset_id;
        let remaining_stake = remaining(&to_stake, &asset_id);
        let remaining_burn = remaining(&to_burn, &asset_id);
        if remaining_stake == 0 && remaining_burn == 0 {
            continue;
        }

        let out: &TransferOutput = match &utxo.out {
            Output::Transfer(out) => out,
            Output::StakeableLock(locked) => {
                if !min_issuance_time.has_reached(locked.locktime) {
                    // Still locked; cannot be burned.
                    continue;
                }
                locked.transfer().ok_or(BuildError::UnknownOutputType {
                    utxo_id: utxo.utxo_id,
                })?
            }
            Output::Opaque { .. } => {
                return Err(BuildError::UnknownOutputType {
                    utxo_id: utxo.utxo_id,
                })
            }
        };
        let Some(sig_indices) = match_owners(addrs, &out.owners, min_issuance_time) else {
            trace!(utxo = %utxo.utxo_id, "skipping utxo: owners not satisfied");
            continue;
        };

        plan.inputs.push(TransferableInput {
            utxo_id: utxo.utxo_id,
            asset_id,
            input: Input::Transfer(TransferInput::new(out.amount, sig_indices)),
        });

        let amount_to_burn = remaining_burn.min(out.amount);
        consume(&mut to_burn, &asset_id, amount_to_burn);

        let available_to_stake = out.amount - amount_to_burn;
        let amount_to_stake = remaining_stake.min(available_to_stake);
        consume(&mut to_stake, &asset_id, amount_to_stake);
        if amount_to_stake > 0 {
            plan.stake_outputs.push(TransferableOutput::transfer(
                asset_id,
                amount_to_stake,
                change_owner.clone(),
            ));
        }

        let change = available_to_stake - amount_to_stake;
        if change > 0 {
            plan.change_outputs.push(TransferableOutput::transfer(
                asset_id,
                change,
                change_owner.clone(),
            ));
        }
        debug!(
            utxo = %utxo.utxo_id,
            amount = out.amount,
            burned = amount_to_burn,
            staked = amount_to_stake,
            "consumed utxo"
        );
    }

    for (asset_id, amount) in to_stake {
        if amount != 0 {
            return Err(BuildError::InsufficientFunds(Shortfall::Stake {
                asset_id,
                amount,
            }));
        }
    }
    for (asset_id, amount) in to_burn {
        if amount != 0 {
            return Err(BuildError::InsufficientFunds(Shortfall::Burn {
                asset_id,
                amount,
            }));
        }
    }

    codec::sort_inputs(&mut plan.inputs);
    codec::sort_outputs(&mut plan.change_outputs)?;
    codec::sort_outputs(&mut plan.stake_outputs)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pchain_transactions::{StakeableLockOut, UtxoId};
    use pchain_types::Address;

    const NATIVE: Id = Id::new([1u8; 32]);
    const OTHER: Id = Id::new([2u8; 32]);
    const NOW: Timestamp = Timestamp::new(1_000);

    fn addr(b: u8) -> Address {
        Address::new([b; 20])
    }

    fn keys() -> AddressSet {
        AddressSet::from([addr(0xa)])
    }

    fn change() -> OutputOwners {
        OutputOwners::single(addr(0xa))
    }

    fn utxo(tx: u8, asset_id: Id, out: Output) -> Utxo {
        Utxo::new(UtxoId::new(Id::new([tx; 32]), 0), asset_id, out)
    }

    fn plain(tx: u8, asset_id: Id, amount: u64, owner: u8) -> Utxo {
        utxo(
            tx,
            asset_id,
            Output::Transfer(TransferOutput::new(amount, OutputOwners::single(addr(owner)))),
        )
    }

    fn locked(tx: u8, asset_id: Id, amount: u64, locktime: u64) -> Utxo {
        utxo(
            tx,
            asset_id,
            Output::StakeableLock(StakeableLockOut::new(
                locktime,
                TransferOutput::new(amount, OutputOwners::single(addr(0xa))),
            )),
        )
    }

    fn stake(amount: u64) -> SpendRequest {
        SpendRequest::new().stake(NATIVE, amount).unwrap()
    }

    fn burn(amount: u64) -> SpendRequest {
        SpendRequest::new().burn(NATIVE, amount).unwrap()
    }

    #[test]
    fn exact_unlocked_stake() {
        let utxos = [plain(1, NATIVE, 2_000, 0xa)];
        let plan = plan_spend(&utxos, stake(2_000), &keys(), &change(), NOW).unwrap();
        assert_eq!(plan.inputs.len(), 1);
        assert!(plan.change_outputs.is_empty());
        assert_eq!(
            plan.stake_outputs,
            vec![TransferableOutput::transfer(NATIVE, 2_000, change())]
        );
    }

    #[test]
    fn active_lock_stays_locked_including_change() {
        let utxos = [locked(1, NATIVE, 3_000, 5_000)];
        let plan = plan_spend(&utxos, stake(2_000), &keys(), &change(), NOW).unwrap();
        assert!(matches!(plan.inputs[0].input, Input::StakeableLock(ref i) if i.locktime == 5_000));
        assert_eq!(
            plan.stake_outputs,
            vec![TransferableOutput::stake_locked(NATIVE, 5_000, 2_000, change())]
        );
        assert_eq!(
            plan.change_outputs,
            vec![TransferableOutput::stake_locked(NATIVE, 5_000, 1_000, change())]
        );
    }

    #[test]
    fn locked_funds_are_preferred_for_stake() {
        let utxos = [plain(1, NATIVE, 5_000, 0xa), locked(2, NATIVE, 2_000, 5_000)];
        let plan = plan_spend(&utxos, stake(2_000), &keys(), &change(), NOW).unwrap();
        assert_eq!(plan.inputs.len(), 1);
        assert_eq!(plan.inputs[0].utxo_id.tx_id, Id::new([2u8; 32]));
    }

    #[test]
    fn matured_lock_spends_as_unlocked() {
        let utxos = [locked(1, NATIVE, 100, 500)];
        let plan = plan_spend(&utxos, burn(30), &keys(), &change(), NOW).unwrap();
        assert!(matches!(plan.inputs[0].input, Input::Transfer(_)));
        assert_eq!(
            plan.change_outputs,
            vec![TransferableOutput::transfer(NATIVE, 70, change())]
        );
    }

    #[test]
    fn active_lock_cannot_be_burned() {
        let utxos = [locked(1, NATIVE, 100, 5_000)];
        let err = plan_spend(&utxos, burn(30), &keys(), &change(), NOW).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InsufficientFunds(Shortfall::Burn { amount: 30, .. })
        ));
    }

    #[test]
    fn burn_comes_before_stake_within_one_utxo() {
        let utxos = [plain(1, NATIVE, 100, 0xa)];
        let request = burn(10).stake(NATIVE, 60).unwrap();
        let plan = plan_spend(&utxos, request, &keys(), &change(), NOW).unwrap();
        assert_eq!(
            plan.stake_outputs,
            vec![TransferableOutput::transfer(NATIVE, 60, change())]
        );
        assert_eq!(
            plan.change_outputs,
            vec![TransferableOutput::transfer(NATIVE, 30, change())]
        );
    }

    #[test]
    fn unauthorized_utxo_is_skipped() {
        let two_of_two = utxo(
            1,
            NATIVE,
            Output::Transfer(TransferOutput::new(
                1_000,
                OutputOwners::new(0, 2, vec![addr(0xa), addr(0xb)]),
            )),
        );
        let err = plan_spend(&[two_of_two.clone()], burn(10), &keys(), &change(), NOW).unwrap_err();
        assert!(err.is_insufficient_funds());

        let utxos = [two_of_two, plain(2, NATIVE, 10, 0xa)];
        let plan = plan_spend(&utxos, burn(10), &keys(), &change(), NOW).unwrap();
        assert_eq!(plan.inputs.len(), 1);
        assert_eq!(plan.inputs[0].utxo_id.tx_id, Id::new([2u8; 32]));
    }

    #[test]
    fn unneeded_assets_are_left_alone() {
        let utxos = [plain(1, OTHER, 10, 0xa), plain(2, NATIVE, 10, 0xa)];
        let plan = plan_spend(&utxos, burn(10), &keys(), &change(), NOW).unwrap();
        assert_eq!(plan.inputs.len(), 1);
        assert_eq!(plan.inputs[0].asset_id, NATIVE);
    }

    #[test]
    fn opaque_output_is_fatal_when_its_asset_is_needed() {
        let opaque = utxo(1, NATIVE, Output::Opaque { type_id: 99, payload: vec![] });
        let utxos = [opaque, plain(2, NATIVE, 10, 0xa)];
        let err = plan_spend(&utxos, burn(10), &keys(), &change(), NOW).unwrap_err();
        assert!(matches!(err, BuildError::UnknownOutputType { .. }));
    }

    #[test]
    fn opaque_output_of_unneeded_asset_is_ignored() {
        let opaque = utxo(1, OTHER, Output::Opaque { type_id: 99, payload: vec![] });
        let utxos = [opaque, plain(2, NATIVE, 10, 0xa)];
        assert!(plan_spend(&utxos, burn(10), &keys(), &change(), NOW).is_ok());
    }

    #[test]
    fn nested_lock_is_fatal_in_pass_one() {
        let inner = Output::StakeableLock(StakeableLockOut::new(
            9_000,
            TransferOutput::new(10, change()),
        ));
        let nested = utxo(
            1,
            NATIVE,
            Output::StakeableLock(StakeableLockOut {
                locktime: 5_000,
                transferable_out: Box::new(inner),
            }),
        );
        let err = plan_spend(&[nested], stake(10), &keys(), &change(), NOW).unwrap_err();
        assert!(matches!(err, BuildError::UnknownOutputType { .. }));
    }

    #[test]
    fn stake_shortfall_is_reported_before_burn_shortfall() {
        let request = burn(5).stake(OTHER, 7).unwrap();
        let err = plan_spend(&[], request, &keys(), &change(), NOW).unwrap_err();
        assert!(matches!(
            err,
            BuildError::InsufficientFunds(Shortfall::Stake { asset_id: OTHER, amount: 7 })
        ));
    }

    #[test]
    fn inputs_come_back_sorted() {
        let utxos = [
            plain(9, NATIVE, 1, 0xa),
            plain(3, NATIVE, 1, 0xa),
            plain(5, NATIVE, 1, 0xa),
        ];
        let plan = plan_spend(&utxos, burn(3), &keys(), &change(), NOW).unwrap();
        assert!(codec::inputs_are_sorted(&plan.inputs));
    }

    #[test]
    fn change_owner_override_is_used() {
        let custom = OutputOwners::single(addr(0xc));
        let utxos = [plain(1, NATIVE, 50, 0xa)];
        let plan = plan_spend(&utxos, burn(10), &keys(), &custom, NOW).unwrap();
        assert_eq!(
            plan.change_outputs,
            vec![TransferableOutput::transfer(NATIVE, 40, custom)]
        );
    }

    #[test]
    fn request_accumulation_detects_overflow() {
        let err = SpendRequest::new()
            .burn(NATIVE, u64::MAX)
            .unwrap()
            .burn(NATIVE, 1)
            .unwrap_err();
        assert_eq!(err, TypesError::Overflow { a: u64::MAX, b: 1 });
    }
}
