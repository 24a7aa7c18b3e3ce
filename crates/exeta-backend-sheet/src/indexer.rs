//! Pattern indexing: from a five-axis pattern and a filter to flat indices.
//!
//! Iteration runs frame, mount, addon, direction, layer, each ascending, so
//! with no filter the output is `0..pattern.len()` in order. The output order
//! decides grid placement downstream.

use exeta_spec::{PatternCoord, SelectionFilter, SpritePattern};

/// Values to iterate on one axis.
fn axis_values(fixed: Option<u32>, count: u32) -> Vec<u32> {
    match fixed {
        Some(value) if value < count => vec![value],
        Some(_) => Vec::new(),
        None => (0..count).collect(),
    }
}

/// Pattern coordinates accepted by `filter`, in iteration order.
pub fn selected_coords(pattern: &SpritePattern, filter: &SelectionFilter) -> Vec<PatternCoord> {
    let frames = axis_values(filter.frame, pattern.frames());
    let mounts = axis_values(filter.mount, pattern.depth());
    let addons = axis_values(filter.addon, pattern.height());
    let directions = axis_values(filter.direction, pattern.width());
    let layers = filter.layers.values(pattern.layers());

    let mut coords = Vec::with_capacity(
        frames.len() * mounts.len() * addons.len() * directions.len() * layers.len(),
    );

    for &frame in &frames {
        for &mount in &mounts {
            for &addon in &addons {
                for &direction in &directions {
                    for &layer in &layers {
                        coords.push(PatternCoord::new(frame, mount, addon, direction, layer));
                    }
                }
            }
        }
    }

    coords
}

/// Flat indices into `pattern.sprite_ids()` accepted by `filter`.
pub fn compute_indices(pattern: &SpritePattern, filter: &SelectionFilter) -> Vec<usize> {
    selected_coords(pattern, filter)
        .into_iter()
        .map(|coord| pattern.flat_index(coord))
        .collect()
}

/// Global sprite ids accepted by `filter`, in placement order.
pub fn selected_sprite_ids(pattern: &SpritePattern, filter: &SelectionFilter) -> Vec<u32> {
    let ids = pattern.sprite_ids();
    compute_indices(pattern, filter)
        .into_iter()
        .map(|index| ids[index])
        .collect()
}
