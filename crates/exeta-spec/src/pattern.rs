//! Validated five-axis sprite patterns.
//!
//! A frame group's flat `spriteId` list is organised by nested positional
//! weighting, most significant first: frame, mount (depth), addon (height),
//! direction (width), layer. That nesting is fixed by the catalog format.

use crate::catalog::SpriteInfo;
use crate::error::IntegrityError;

/// A position in the five-axis pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PatternCoord {
    pub frame: u32,
    pub mount: u32,
    pub addon: u32,
    pub direction: u32,
    pub layer: u32,
}

impl PatternCoord {
    /// Creates a coordinate in nesting order.
    pub fn new(frame: u32, mount: u32, addon: u32, direction: u32, layer: u32) -> Self {
        Self {
            frame,
            mount,
            addon,
            direction,
            layer,
        }
    }
}

/// A frame group pattern whose sprite count matches its dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpritePattern {
    frames: u32,
    depth: u32,
    height: u32,
    width: u32,
    layers: u32,
    sprite_ids: Vec<u32>,
}

impl SpritePattern {
    /// Builds a pattern from explicit dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError`] when a dimension is zero or when
    /// `sprite_ids.len()` differs from `frames * depth * height * width * layers`.
    pub fn new(
        frames: u32,
        depth: u32,
        height: u32,
        width: u32,
        layers: u32,
        sprite_ids: Vec<u32>,
    ) -> Result<Self, IntegrityError> {
        for (name, value) in [
            ("frames", frames),
            ("patternDepth", depth),
            ("patternHeight", height),
            ("patternWidth", width),
            ("layers", layers),
        ] {
            if value == 0 {
                return Err(IntegrityError::ZeroDimension(name));
            }
        }

        let expected = [frames, depth, height, width, layers]
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d as usize))
            .ok_or(IntegrityError::Overflow)?;

        if sprite_ids.len() != expected {
            return Err(IntegrityError::CountMismatch {
                frames,
                depth,
                height,
                width,
                layers,
                expected,
                actual: sprite_ids.len(),
            });
        }

        Ok(Self {
            frames,
            depth,
            height,
            width,
            layers,
            sprite_ids,
        })
    }

    /// Builds a pattern from a catalog `spriteInfo` block.
    pub fn from_info(info: &SpriteInfo) -> Result<Self, IntegrityError> {
        Self::new(
            info.frame_count(),
            info.pattern_depth,
            info.pattern_height,
            info.pattern_width,
            info.layers,
            info.sprite_ids.clone(),
        )
    }

    /// Animation frame count.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Mount count (`patternDepth`).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Addon count (`patternHeight`).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Direction count (`patternWidth`).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Render layer count.
    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// Flat sprite identifier list.
    pub fn sprite_ids(&self) -> &[u32] {
        &self.sprite_ids
    }

    /// Total number of sprites in the pattern.
    pub fn len(&self) -> usize {
        self.sprite_ids.len()
    }

    /// Always false for a validated pattern.
    pub fn is_empty(&self) -> bool {
        self.sprite_ids.is_empty()
    }

    /// Returns true if every component of `coord` is inside the pattern.
    pub fn contains(&self, coord: PatternCoord) -> bool {
        coord.frame < self.frames
            && coord.mount < self.depth
            && coord.addon < self.height
            && coord.direction < self.width
            && coord.layer < self.layers
    }

    /// Flat index of a coordinate into [`sprite_ids`](Self::sprite_ids).
    ///
    /// The coordinate is not range-checked; use [`contains`](Self::contains)
    /// first when it comes from untrusted input.
    pub fn flat_index(&self, coord: PatternCoord) -> usize {
        let (depth, height, width, layers) = (
            self.depth as usize,
            self.height as usize,
            self.width as usize,
            self.layers as usize,
        );
        ((((coord.frame as usize * depth + coord.mount as usize) * height
            + coord.addon as usize)
            * width
            + coord.direction as usize)
            * layers)
            + coord.layer as usize
    }

    /// Global sprite identifier at a flat index.
    pub fn sprite_id(&self, index: usize) -> Option<u32> {
        self.sprite_ids.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Animation;

    fn info(width: u32, height: u32, depth: u32, layers: u32, ids: Vec<u32>) -> SpriteInfo {
        SpriteInfo {
            pattern_width: width,
            pattern_height: height,
            pattern_depth: depth,
            layers,
            sprite_ids: ids,
            animation: None,
        }
    }

    #[test]
    fn test_from_info_valid() {
        let pattern = SpritePattern::from_info(&info(4, 2, 2, 1, (100..116).collect())).unwrap();
        assert_eq!(pattern.len(), 16);
        assert_eq!(pattern.frames(), 1);
        assert_eq!(pattern.sprite_id(0), Some(100));
        assert_eq!(pattern.sprite_id(16), None);
    }

    #[test]
    fn test_count_mismatch_reported() {
        let err = SpritePattern::from_info(&info(4, 1, 1, 1, vec![1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            IntegrityError::CountMismatch {
                frames: 1,
                depth: 1,
                height: 1,
                width: 4,
                layers: 1,
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_frames_from_animation() {
        let mut sprite_info = info(4, 1, 1, 1, (0..12).collect());
        sprite_info.animation = Some(Animation {
            sprite_phases: vec![serde_json::Value::Null; 3],
        });
        let pattern = SpritePattern::from_info(&sprite_info).unwrap();
        assert_eq!(pattern.frames(), 3);
    }

    #[test]
    fn test_empty_phase_list_is_one_frame() {
        let mut sprite_info = info(4, 1, 1, 1, (0..4).collect());
        sprite_info.animation = Some(Animation::default());
        let pattern = SpritePattern::from_info(&sprite_info).unwrap();
        assert_eq!(pattern.frames(), 1);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = SpritePattern::from_info(&info(4, 1, 1, 0, vec![])).unwrap_err();
        assert_eq!(err, IntegrityError::ZeroDimension("layers"));
    }

    #[test]
    fn test_flat_index_nesting() {
        // frames=2, depth=2, height=3, width=4, layers=2
        let pattern = SpritePattern::new(2, 2, 3, 4, 2, (0..96).collect()).unwrap();

        assert_eq!(pattern.flat_index(PatternCoord::new(0, 0, 0, 0, 0)), 0);
        assert_eq!(pattern.flat_index(PatternCoord::new(0, 0, 0, 0, 1)), 1);
        assert_eq!(pattern.flat_index(PatternCoord::new(0, 0, 0, 1, 0)), 2);
        assert_eq!(pattern.flat_index(PatternCoord::new(0, 0, 1, 0, 0)), 8);
        assert_eq!(pattern.flat_index(PatternCoord::new(0, 1, 0, 0, 0)), 24);
        assert_eq!(pattern.flat_index(PatternCoord::new(1, 0, 0, 0, 0)), 48);
        assert_eq!(pattern.flat_index(PatternCoord::new(1, 1, 2, 3, 1)), 95);
    }

    #[test]
    fn test_contains() {
        let pattern = SpritePattern::new(1, 1, 1, 4, 2, (0..8).collect()).unwrap();
        assert!(pattern.contains(PatternCoord::new(0, 0, 0, 3, 1)));
        assert!(!pattern.contains(PatternCoord::new(0, 0, 0, 4, 0)));
        assert!(!pattern.contains(PatternCoord::new(0, 0, 0, 0, 2)));
        assert!(!pattern.contains(PatternCoord::new(1, 0, 0, 0, 0)));
    }
}
