//! Catalog records as they appear in the metadata JSON.
//!
//! The catalog is a JSON array with one record per entity. Field names follow
//! the asset editor export (`frameGroup`, `spriteInfo`, `patternWidth`, ...).
//! Fields this crate does not model are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// The full entity catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    /// Entity records in file order.
    pub entities: Vec<EntityRecord>,
}

impl Catalog {
    /// Parses a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Number of entities in the catalog.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the catalog has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Finds the first entity with the given id.
    pub fn find(&self, id: u32) -> Option<&EntityRecord> {
        self.entities.iter().find(|e| e.id == id)
    }
}

/// One entity (creature, outfit, effect) and its animation groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Unique entity id; also names the output files.
    pub id: u32,

    /// Tile edge length in pixels.
    pub size: u32,

    /// Animation groups in catalog order.
    #[serde(rename = "frameGroup")]
    pub frame_groups: Vec<FrameGroup>,
}

/// A named collection of sprites for one animation (idle, walking, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameGroup {
    /// Identifying label such as `FRAME_GROUP_WALKING`.
    #[serde(rename = "fixedFrameGroup", alias = "label", default)]
    pub label: String,

    /// Pattern dimensions and sprite identifiers.
    #[serde(rename = "spriteInfo")]
    pub sprite_info: SpriteInfo,
}

impl FrameGroup {
    /// Animation type tag: the label text after the last underscore, lowercased.
    ///
    /// `FRAME_GROUP_WALKING` becomes `walking`; a label without underscores is
    /// lowercased whole.
    pub fn animation_tag(&self) -> String {
        self.label
            .rsplit('_')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Raw pattern description of a frame group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteInfo {
    /// Direction count.
    pub pattern_width: u32,

    /// Addon count.
    pub pattern_height: u32,

    /// Mount count.
    pub pattern_depth: u32,

    /// Render layer count.
    pub layers: u32,

    /// Flat list of global sprite identifiers.
    #[serde(rename = "spriteId", default)]
    pub sprite_ids: Vec<u32>,

    /// Animation phases; absent for static groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
}

impl SpriteInfo {
    /// Number of animation frames.
    ///
    /// The phase list length when present and non-empty, otherwise 1. An
    /// empty phase list never yields zero frames.
    pub fn frame_count(&self) -> u32 {
        self.animation
            .as_ref()
            .map(|a| a.sprite_phases.len() as u32)
            .filter(|&n| n > 0)
            .unwrap_or(1)
    }
}

/// Animation block of a frame group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Per-frame phase records. Only the count matters here.
    #[serde(rename = "spritePhase", default)]
    pub sprite_phases: Vec<serde_json::Value>,
}
