//! Matching owner requirements against the controlled address set.

use pchain_transactions::OutputOwners;
use pchain_types::{AddressSet, Timestamp};

/// Pick signer indices for `owners` from the addresses the wallet controls.
///
/// Returns `None` while `owners` is still time-locked at `min_issuance_time`,
/// or when fewer than `threshold` listed addresses are controlled. Otherwise
/// returns the positions of the first `threshold` controlled addresses, in
/// listed order. The result depends only on its inputs, so wallets sharing
/// keys produce identical authorizations for the same output.
pub fn match_owners(
    addrs: &AddressSet,
    owners: &OutputOwners,
    min_issuance_time: Timestamp,
) -> Option<Vec<u32>> {
    if !min_issuance_time.has_reached(owners.locktime) {
        return None;
    }

    let threshold = owners.threshold as usize;
    let mut sigs = Vec::with_capacity(threshold.min(owners.addresses.len()));
    for (index, addr) in owners.addresses.iter().enumerate() {
        if sigs.len() >= threshold {
            break;
        }
        if addrs.contains(addr) {
            sigs.push(index as u32);
        }
    }

    (sigs.len() == threshold).then_some(sigs)
}
