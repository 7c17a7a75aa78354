//! Property-based tests for the memoization cache
//!
//! **Feature: adjacent-product-cache**

use memo_cache::{CacheKey, CacheStatus, MemoCache, MemoError, max_adjacent_product};
use proptest::prelude::*;

/// Straightforward reference: every adjacent product, then the maximum
fn reference_max(seq: &[i64]) -> Option<i128> {
    seq.windows(2)
        .map(|w| i128::from(w[0]) * i128::from(w[1]))
        .max()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// **Property 1: Repeat lookups hit**
    /// *For any* sequence of length >= 2, a second identical lookup returns
    /// the same value and reports a hit.
    #[test]
    fn prop_second_lookup_hits(seq in prop::collection::vec(any::<i64>(), 2..32)) {
        let cache = MemoCache::new();

        let first = cache.get_or_compute(&seq).unwrap();
        let second = cache.get_or_compute(&seq).unwrap();

        prop_assert_eq!(first.status, CacheStatus::Miss);
        prop_assert_eq!(second.status, CacheStatus::Hit);
        prop_assert_eq!(first.value, second.value);
        prop_assert_eq!(cache.size(), 1);
    }

    /// **Property 2: Distinct sequences get distinct keys**
    #[test]
    fn prop_distinct_sequences_distinct_keys(
        a in prop::collection::vec(any::<i64>(), 0..16),
        b in prop::collection::vec(any::<i64>(), 0..16),
    ) {
        let ka = CacheKey::from_sequence(&a);
        let kb = CacheKey::from_sequence(&b);
        prop_assert_eq!(a == b, ka == kb);
        prop_assert_eq!(ka.to_sequence(), a);
    }

    /// **Property 3: Reordering changes the key**
    #[test]
    fn prop_swapped_elements_change_key(
        seq in prop::collection::vec(-1000i64..1000, 2..16),
        i in 0usize..16,
        j in 0usize..16,
    ) {
        let (i, j) = (i % seq.len(), j % seq.len());
        let mut swapped = seq.clone();
        swapped.swap(i, j);
        let same = swapped == seq;
        prop_assert_eq!(
            CacheKey::from_sequence(&seq) == CacheKey::from_sequence(&swapped),
            same
        );
    }

    /// **Property 4: Short input is rejected and never stored**
    #[test]
    fn prop_short_input_rejected(seq in prop::collection::vec(any::<i64>(), 0..2)) {
        let cache = MemoCache::new();
        let result = cache.get_or_compute(&seq);
        prop_assert!(matches!(result, Err(MemoError::InvalidInput(_))));
        prop_assert_eq!(cache.size(), 0);
        prop_assert!(!cache.has(&seq));
    }

    /// **Property 5: Clear forgets everything**
    #[test]
    fn prop_clear_forgets(seqs in prop::collection::vec(prop::collection::vec(-50i64..50, 2..8), 1..10)) {
        let cache = MemoCache::new();
        for seq in &seqs {
            cache.get_or_compute(seq).unwrap();
        }
        prop_assert!(cache.size() >= 1);

        cache.clear();

        prop_assert_eq!(cache.size(), 0);
        for seq in &seqs {
            prop_assert!(!cache.has(seq));
        }
    }

    /// **Property 6: Agrees with a direct scan**
    #[test]
    fn prop_matches_reference(seq in prop::collection::vec(any::<i64>(), 2..64)) {
        let expected = reference_max(&seq).unwrap();
        prop_assert_eq!(max_adjacent_product(&seq).unwrap(), expected);
    }
}
