//! Test fixture utilities for creating synthetic extraction projects.

use exeta_cli::config::ExtractConfig;
use image::{imageops, Rgba, RgbaImage};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Columns of every synthetic atlas.
pub const ATLAS_COLUMNS: u32 = 8;

/// The color every pixel of sprite `sprite_id` is filled with.
pub fn sprite_color(sprite_id: u32) -> Rgba<u8> {
    Rgba([
        (sprite_id & 0xff) as u8,
        ((sprite_id >> 8) & 0xff) as u8,
        0x7f,
        255,
    ])
}

/// An atlas holding sprites `start..=end`, `tile_size` pixels each.
pub fn synthetic_atlas(start: u32, end: u32, tile_size: u32) -> RgbaImage {
    let count = end - start + 1;
    let rows = count.div_ceil(ATLAS_COLUMNS);
    let mut atlas = RgbaImage::new(ATLAS_COLUMNS * tile_size, rows * tile_size);

    for offset in 0..count {
        let tile = RgbaImage::from_pixel(tile_size, tile_size, sprite_color(start + offset));
        let x = (offset % ATLAS_COLUMNS) * tile_size;
        let y = (offset / ATLAS_COLUMNS) * tile_size;
        imageops::replace(&mut atlas, &tile, i64::from(x), i64::from(y));
    }

    atlas
}

/// A frame group record as it appears in the catalog.
pub fn frame_group(label: &str, width: u32, layers: u32, frames: u32, sprite_ids: &[u32]) -> Value {
    let phases: Vec<Value> = (0..frames).map(|_| json!({})).collect();
    json!({
        "fixedFrameGroup": label,
        "spriteInfo": {
            "patternWidth": width,
            "patternHeight": 1,
            "patternDepth": 1,
            "layers": layers,
            "spriteId": sprite_ids,
            "animation": { "spritePhase": phases }
        }
    })
}

/// An entity record as it appears in the catalog.
pub fn entity(id: u32, size: u32, groups: Vec<Value>) -> Value {
    json!({ "id": id, "size": size, "frameGroup": groups })
}

/// A throwaway project: catalog, atlas directory and output directory.
pub struct ProjectFixture {
    pub root: TempDir,
    pub atlas_dir: PathBuf,
    pub out_dir: PathBuf,
    pub catalog_path: PathBuf,
}

impl ProjectFixture {
    /// Create a new project with an empty atlas directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let atlas_dir = root.path().join("spritesheets");
        fs::create_dir_all(&atlas_dir).expect("Failed to create atlas dir");
        let out_dir = root.path().join("output");
        let catalog_path = root.path().join("assets-editor-data.json");
        Self {
            root,
            atlas_dir,
            out_dir,
            catalog_path,
        }
    }

    /// Get the project root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write a synthetic atlas named `<start>-<end>.png`.
    pub fn add_atlas(&self, start: u32, end: u32, tile_size: u32) -> PathBuf {
        let path = self.atlas_dir.join(format!("{}-{}.png", start, end));
        synthetic_atlas(start, end, tile_size)
            .save(&path)
            .expect("Failed to write atlas");
        path
    }

    /// Write the catalog from entity records.
    pub fn write_catalog(&self, entities: Vec<Value>) -> PathBuf {
        let content =
            serde_json::to_string_pretty(&Value::Array(entities)).expect("Failed to serialize");
        fs::write(&self.catalog_path, content).expect("Failed to write catalog");
        self.catalog_path.clone()
    }

    /// Extract configuration pointing at this project.
    pub fn config(&self) -> ExtractConfig {
        ExtractConfig {
            catalog: self.catalog_path.clone(),
            atlas_dir: self.atlas_dir.clone(),
            out_dir: self.out_dir.clone(),
            ..ExtractConfig::default()
        }
    }

    /// Path of an entity's sheet.
    pub fn sheet_path(&self, entity_id: u32) -> PathBuf {
        exeta_backend_sheet::sheet_path(&self.out_dir, entity_id)
    }

    /// Path of an entity's thumbnail.
    pub fn thumbnail_path(&self, entity_id: u32) -> PathBuf {
        exeta_backend_sheet::thumbnail_path(&self.out_dir, entity_id)
    }

    /// Decode a written sheet.
    pub fn read_sheet(&self, entity_id: u32) -> RgbaImage {
        image::open(self.sheet_path(entity_id))
            .expect("Failed to open sheet")
            .to_rgba8()
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
