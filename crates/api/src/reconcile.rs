//! Reconciliation of the two submission-channel aggregations.
//!
//! Blocks are recorded independently from the regular bundle channel and the
//! privileged megabundle channel. For a block present in the megabundle set
//! the megabundle content is either the complete bundle content (superseding
//! the regular view) or a strict subset already counted there, and the relay
//! never marks which. Neither a plain union nor an intersection is safe: the
//! union double counts, the intersection drops exclusive content. Instead
//! one view is selected as canonical per block and the megabundle membership
//! of its transactions is inferred structurally.

use std::collections::BTreeMap;

use api_types::Block;

/// Which channel's view represents a block number authoritatively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Canonical {
    Merged,
    Megabundle,
}

/// Pick the canonical view for a block present in both sets.
///
/// More transactions = the more complete recording. This is a proxy, not a
/// semantic guarantee; it is kept as a named policy so it can be swapped
/// without touching the merge and attribution walk.
fn select_canonical(merged: &Block, megabundle: &Block) -> Canonical {
    if megabundle.transactions.len() > merged.transactions.len() {
        Canonical::Megabundle
    } else {
        Canonical::Merged
    }
}

fn tag_all(block: &mut Block) {
    for tx in &mut block.transactions {
        tx.is_megabundle = Some(true);
    }
}

/// Walk the merged block's transactions by position and tag the ones whose
/// hash agrees with the megabundle transaction at the same position.
///
/// Strictly positional, not a hash-set lookup: overlapping transactions are
/// assumed to appear in the same relative order in both channels.
fn tag_positional(base: &mut Block, megabundle: &Block) {
    for (i, tx) in base.transactions.iter_mut().enumerate() {
        let matches = megabundle
            .transactions
            .get(i)
            .is_some_and(|m| m.transaction_hash == tx.transaction_hash);
        if matches {
            tx.is_megabundle = Some(true);
        }
    }
}

/// Reconcile one block number. Fields of the chosen view are taken verbatim,
/// they are never re-summed across channels.
fn merge_block(merged: Option<Block>, megabundle: Option<Block>) -> Option<Block> {
    match (merged, megabundle) {
        (None, None) => None,
        (Some(m), None) => Some(m),
        (None, Some(mut g)) => {
            tag_all(&mut g);
            Some(g)
        }
        (Some(mut m), Some(g)) => match select_canonical(&m, &g) {
            Canonical::Megabundle => {
                let mut g = g;
                tag_all(&mut g);
                Some(g)
            }
            Canonical::Merged => {
                tag_positional(&mut m, &g);
                Some(m)
            }
        },
    }
}

/// Merge the two sparse, block-number-keyed result sets into one ordered,
/// deduplicated block list with per-transaction channel attribution.
///
/// Each input set is independently limited, so their union may exceed
/// `limit`; the highest `limit` distinct block numbers are kept and emitted
/// in descending order, matching the pagination contract. Pure function:
/// reconciling the same inputs twice yields identical output.
pub fn reconcile(merged: Vec<Block>, megabundle: Vec<Block>, limit: u64) -> Vec<Block> {
    let mut merged: BTreeMap<u64, Block> =
        merged.into_iter().map(|b| (b.block_number, b)).collect();
    let mut megabundle: BTreeMap<u64, Block> =
        megabundle.into_iter().map(|b| (b.block_number, b)).collect();

    let mut numbers: Vec<u64> = merged.keys().chain(megabundle.keys()).copied().collect();
    numbers.sort_unstable();
    numbers.dedup();

    numbers
        .into_iter()
        .rev()
        .take(limit as usize)
        .filter_map(|n| merge_block(merged.remove(&n), megabundle.remove(&n)))
        .collect()
}
