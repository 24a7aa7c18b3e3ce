//! Property tests for pattern indexing.

use std::collections::HashSet;

use exeta_backend_sheet::{compute_indices, selected_coords};
use exeta_spec::{SelectionFilter, SpritePattern};
use proptest::prelude::*;

fn dims() -> impl Strategy<Value = (u32, u32, u32, u32, u32)> {
    (1u32..=4, 1u32..=3, 1u32..=3, 1u32..=8, 1u32..=3)
}

fn build(dims: (u32, u32, u32, u32, u32)) -> SpritePattern {
    let (f, d, h, w, l) = dims;
    let len = f * d * h * w * l;
    SpritePattern::new(f, d, h, w, l, (0..len).map(|i| i + 10_000).collect()).unwrap()
}

proptest! {
    /// Unfiltered indexing enumerates every index exactly once, in order.
    #[test]
    fn unfiltered_covers_all_indices(dims in dims()) {
        let pattern = build(dims);
        let indices = compute_indices(&pattern, &SelectionFilter::any());
        let expected: Vec<usize> = (0..pattern.len()).collect();
        prop_assert_eq!(indices, expected);
    }

    /// Each coordinate maps to the flat index formula.
    #[test]
    fn coords_follow_flat_index_formula(dims in dims()) {
        let pattern = build(dims);
        let (_, d, h, w, l) = dims;
        for (i, c) in selected_coords(&pattern, &SelectionFilter::any()).into_iter().enumerate() {
            let index = ((((c.frame * d + c.mount) * h + c.addon) * w + c.direction) * l + c.layer) as usize;
            prop_assert_eq!(index, i);
            prop_assert_eq!(pattern.flat_index(c), i);
        }
    }

    /// Fixing a direction divides the count by the direction count.
    #[test]
    fn fixed_direction_divides_count(dims in dims(), pick in 0u32..8) {
        let pattern = build(dims);
        let direction = pick % dims.3;
        let filter = SelectionFilter::any().with_direction(direction);
        let indices = compute_indices(&pattern, &filter);

        prop_assert_eq!(indices.len(), pattern.len() / dims.3 as usize);
        let unique: HashSet<_> = indices.iter().collect();
        prop_assert_eq!(unique.len(), indices.len());
    }

    /// Fixing every axis selects at most one index per accepted layer.
    #[test]
    fn fully_fixed_selects_single_sprite(dims in dims(), seed in 0u32..1000) {
        let pattern = build(dims);
        let (f, d, h, w, l) = dims;
        let filter = SelectionFilter::any()
            .with_frame(seed % f)
            .with_mount(seed % d)
            .with_addon(seed % h)
            .with_direction(seed % w)
            .with_layers([seed % l])
            .unwrap();
        prop_assert_eq!(compute_indices(&pattern, &filter).len(), 1);
    }

    /// Filtered output is always a subsequence of the unfiltered order.
    #[test]
    fn filtered_is_increasing(dims in dims(), frame in 0u32..4, mount in 0u32..3) {
        let pattern = build(dims);
        let filter = SelectionFilter::any().with_frame(frame).with_mount(mount);
        let indices = compute_indices(&pattern, &filter);
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(indices.iter().all(|&i| i < pattern.len()));
    }
}
