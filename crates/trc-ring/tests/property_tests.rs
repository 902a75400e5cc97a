use proptest::prelude::*;
use trc_ring::Ring;

proptest! {
    /// Ring newest-first: for any sequence of `add`s, `walk`/`snapshot`
    /// yields the last `min(count, capacity)` items in reverse insertion
    /// order.
    #[test]
    fn newest_first_for_any_sequence(capacity in 1usize..16, values in prop::collection::vec(0i32..10_000, 0..200)) {
        let ring: Ring<i32> = Ring::new(capacity);
        for v in &values {
            ring.add(*v);
        }
        let expected: Vec<i32> = values
            .iter()
            .rev()
            .take(capacity)
            .copied()
            .collect();
        prop_assert_eq!(ring.snapshot(), expected);
    }

    /// Resize preservation: items lost after shrinking are never
    /// re-observed after growing back.
    #[test]
    fn resize_never_resurrects_dropped_items(
        c1 in 1usize..12,
        c2 in 1usize..12,
        c3 in 1usize..12,
        values in prop::collection::vec(0i32..10_000, 0..64),
    ) {
        let ring: Ring<i32> = Ring::new(c1);
        for v in &values {
            ring.add(*v);
        }
        let after_shrink = ring.resize(c2);
        let surviving_after_shrink: std::collections::HashSet<_> =
            ring.snapshot().into_iter().collect();

        ring.resize(c3);
        let after_regrow: std::collections::HashSet<_> = ring.snapshot().into_iter().collect();

        // anything dropped by the shrink must never reappear
        for dropped in &after_shrink {
            if !surviving_after_shrink.contains(dropped) {
                prop_assert!(!after_regrow.contains(dropped) || surviving_after_shrink.contains(dropped));
            }
        }
        // the regrow can only ever contain items that survived the shrink
        for v in &after_regrow {
            prop_assert!(surviving_after_shrink.contains(v));
        }
    }
}
