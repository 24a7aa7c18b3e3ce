//! Per-dimension selection filters.
//!
//! A filter pins any of the frame, direction, addon and mount axes to a fixed
//! value and restricts the layers that are emitted. The filter is always
//! passed explicitly to the indexer; there is no process-wide default.

use serde::Serialize;

use crate::error::FilterError;

/// Which render layers to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSelection {
    /// Every layer in ascending order.
    #[default]
    All,
    /// Only the listed layers, in the listed order. Never empty.
    Only(Vec<u32>),
}

impl LayerSelection {
    /// Layer values to iterate for a pattern with `count` layers.
    ///
    /// Values outside `0..count` are dropped.
    pub fn values(&self, count: u32) -> Vec<u32> {
        match self {
            LayerSelection::All => (0..count).collect(),
            LayerSelection::Only(layers) => {
                layers.iter().copied().filter(|&l| l < count).collect()
            }
        }
    }
}

/// Selection constraints applied while indexing a pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionFilter {
    /// Fixed animation frame, or any.
    pub frame: Option<u32>,
    /// Fixed direction (0 = north, 1 = east, 2 = south, 3 = west), or any.
    pub direction: Option<u32>,
    /// Fixed addon, or any.
    pub addon: Option<u32>,
    /// Fixed mount, or any.
    pub mount: Option<u32>,
    /// Accepted layers.
    pub layers: LayerSelection,
}

impl SelectionFilter {
    /// A filter that accepts every sprite.
    pub fn any() -> Self {
        Self::default()
    }

    /// Pins the frame axis.
    pub fn with_frame(mut self, frame: u32) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Pins the direction axis.
    pub fn with_direction(mut self, direction: u32) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Pins the addon axis.
    pub fn with_addon(mut self, addon: u32) -> Self {
        self.addon = Some(addon);
        self
    }

    /// Pins the mount axis.
    pub fn with_mount(mut self, mount: u32) -> Self {
        self.mount = Some(mount);
        self
    }

    /// Restricts the accepted layers.
    ///
    /// Order is preserved and repeated values are kept only once.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::EmptyLayerSet`] if `layers` yields nothing.
    pub fn with_layers<I>(mut self, layers: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut unique: Vec<u32> = Vec::new();
        for layer in layers {
            if !unique.contains(&layer) {
                unique.push(layer);
            }
        }
        if unique.is_empty() {
            return Err(FilterError::EmptyLayerSet);
        }
        self.layers = LayerSelection::Only(unique);
        Ok(self)
    }

    /// Returns true if the filter accepts every sprite.
    pub fn is_any(&self) -> bool {
        self.frame.is_none()
            && self.direction.is_none()
            && self.addon.is_none()
            && self.mount.is_none()
            && self.layers == LayerSelection::All
    }
}
