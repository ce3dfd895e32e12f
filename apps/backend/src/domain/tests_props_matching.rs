//! Property tests for the matching validator (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::matching::{validate_matching, MatchingError, Side};
use crate::domain::spec::MatchPair;
use crate::domain::test_prelude;

/// A perfect matching of `n` items, pairs in random order.
fn perfect_matching(max: usize) -> impl Strategy<Value = Vec<MatchPair>> {
    (0..=max).prop_flat_map(|n| {
        (
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
        )
            .prop_map(|(lefts, rights)| {
                lefts
                    .into_iter()
                    .zip(rights)
                    .map(|(l, r)| MatchPair::new(l, r))
                    .collect()
            })
    })
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Every perfect matching is accepted.
    #[test]
    fn prop_perfect_matching_accepted(pairs in perfect_matching(8)) {
        let n = pairs.len();
        prop_assert_eq!(validate_matching(n, n, &pairs), Ok(()));
    }

    /// Dropping any pair leaves exactly its left item unmatched.
    #[test]
    fn prop_dropped_pair_reports_its_left_item(
        pairs in perfect_matching(8).prop_filter("non-empty", |p| !p.is_empty()),
        pick in any::<prop::sample::Index>(),
    ) {
        let n = pairs.len();
        let mut pairs = pairs;
        let dropped = pairs.remove(pick.index(n));
        prop_assert_eq!(
            validate_matching(n, n, &pairs),
            Err(MatchingError::LeftUnmatched(dropped.left))
        );
    }

    /// Reusing an earlier pair's left index is reported at the reuse.
    #[test]
    fn prop_reused_left_index_rejected(
        pairs in perfect_matching(8).prop_filter("two or more", |p| p.len() >= 2),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let n = pairs.len();
        // two distinct indices without rejection sampling
        let i = a.index(n);
        let j = b.index(n - 1);
        let j = if j >= i { j + 1 } else { j };
        let (first, second) = (i.min(j), i.max(j));

        let mut pairs = pairs;
        let reused = pairs[first].left;
        pairs[second].left = reused;

        prop_assert_eq!(
            validate_matching(n, n, &pairs),
            Err(MatchingError::MatchedMoreThanOnce { side: Side::Left, index: reused })
        );
    }

    /// Sizes are compared before any pair is looked at.
    #[test]
    fn prop_unequal_sides_rejected(
        left in 0usize..10,
        extra in 1usize..5,
        swap in any::<bool>(),
        pairs in perfect_matching(4),
    ) {
        let (left, right) = if swap { (left + extra, left) } else { (left, left + extra) };
        prop_assert_eq!(
            validate_matching(left, right, &pairs),
            Err(MatchingError::UnequalSides { left, right })
        );
    }
}
