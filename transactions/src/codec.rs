//! Canonical byte encoding and the sort orders built on it.
//!
//! Canonical bytes are bincode with big-endian, fixed-width integers, so two
//! outputs that share an asset id and shape compare by amount numerically.
//! Transaction identity depends on these orders; every builder path sorts
//! through here before returning.

use bincode::Options;
use serde::Serialize;

use crate::error::TransactionError;
use crate::input::TransferableInput;
use crate::output::TransferableOutput;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
}

/// Encode any transaction component into its canonical bytes.
pub fn canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, TransactionError> {
    options()
        .serialize(value)
        .map_err(|e| TransactionError::Codec(e.to_string()))
}

/// Sort inputs by the UTXO they consume.
pub fn sort_inputs(inputs: &mut [TransferableInput]) {
    inputs.sort_by(|a, b| a.utxo_id.cmp(&b.utxo_id));
}

/// Sort outputs by their canonical bytes.
pub fn sort_outputs(outputs: &mut Vec<TransferableOutput>) -> Result<(), TransactionError> {
    let keys = outputs
        .iter()
        .map(canonical_bytes)
        .collect::<Result<Vec<_>, _>>()?;
    let mut keyed: Vec<_> = keys.into_iter().zip(std::mem::take(outputs)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    outputs.extend(keyed.into_iter().map(|(_, out)| out));
    Ok(())
}

pub fn is_sorted_and_unique<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0] < w[1])
}

pub fn inputs_are_sorted(inputs: &[TransferableInput]) -> bool {
    inputs.windows(2).all(|w| w[0].utxo_id < w[1].utxo_id)
}

pub fn outputs_are_sorted(outputs: &[TransferableOutput]) -> Result<bool, TransactionError> {
    let keys = outputs
        .iter()
        .map(canonical_bytes)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(keys.windows(2).all(|w| w[0] <= w[1]))
}
