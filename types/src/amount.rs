//! Overflow-checked u64 amount arithmetic.
//!
//! Every amount on the platform chain is a raw u64. Sums that feed a
//! transaction body must never wrap, so callers go through these helpers and
//! surface [`TypesError::Overflow`] instead.

use crate::TypesError;

/// `a + b`, or [`TypesError::Overflow`].
pub fn add(a: u64, b: u64) -> Result<u64, TypesError> {
    a.checked_add(b).ok_or(TypesError::Overflow { a, b })
}

/// `a - b`, or [`TypesError::Underflow`].
pub fn sub(a: u64, b: u64) -> Result<u64, TypesError> {
    a.checked_sub(b).ok_or(TypesError::Underflow { a, b })
}

/// Sum an iterator of amounts, failing on the first overflow.
pub fn sum<I: IntoIterator<Item = u64>>(amounts: I) -> Result<u64, TypesError> {
    amounts.into_iter().try_fold(0u64, add)
}
