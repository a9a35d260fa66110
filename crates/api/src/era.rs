//! Protocol-era routing for block queries.

use storage::BlockFilter;

/// Decide whether a request needs the dual-channel reconciliation path.
///
/// The megabundle channel only existed before the transition block. A
/// request scopes into that era when its exact `block_number` filter or its
/// `before` cursor lies below the cutoff; everything else is served by the
/// single regular-channel aggregation. Inputs are already validated, the
/// router never sees malformed parameters.
pub const fn uses_megabundles(filter: &BlockFilter, transition_block: u64) -> bool {
    if let Some(n) = filter.block_number {
        if n < transition_block {
            return true;
        }
    }
    if let Some(b) = filter.before {
        if b < transition_block {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUTOFF: u64 = 15_537_394;

    #[test]
    fn unbounded_requests_use_the_single_channel_path() {
        assert!(!uses_megabundles(&BlockFilter::default(), CUTOFF));
    }

    #[test]
    fn block_number_below_cutoff_routes_dual_channel() {
        let filter = BlockFilter { block_number: Some(CUTOFF - 1), ..Default::default() };
        assert!(uses_megabundles(&filter, CUTOFF));
    }

    #[test]
    fn block_number_below_cutoff_wins_even_with_before_above() {
        let filter = BlockFilter {
            block_number: Some(CUTOFF - 1),
            before: Some(CUTOFF + 1_000_000),
            ..Default::default()
        };
        assert!(uses_megabundles(&filter, CUTOFF));
    }

    #[test]
    fn before_below_cutoff_routes_dual_channel() {
        let filter = BlockFilter { before: Some(CUTOFF - 1), ..Default::default() };
        assert!(uses_megabundles(&filter, CUTOFF));
    }

    #[test]
    fn at_or_above_cutoff_stays_single_channel() {
        let filter = BlockFilter {
            block_number: Some(CUTOFF),
            before: Some(CUTOFF),
            ..Default::default()
        };
        assert!(!uses_megabundles(&filter, CUTOFF));
    }
}
