//! Exeta Sprite Sheet Backend
//!
//! This crate rebuilds per-entity animation sheets from packed source atlases.
//! Output is deterministic: the same catalog entry and atlases always encode
//! to byte-identical PNG files.
//!
//! # Pipeline
//!
//! - **Atlas Locator** ([`atlas`]): sprite id to atlas file and local offset
//! - **Tile Extractor** ([`tile`]): local offset to pixel rectangle
//! - **Pattern Indexer** ([`indexer`]): pattern and filter to flat indices
//! - **Sheet Composer** ([`compose`], [`sheet`]): grid placement, group
//!   stacking, thumbnail and PNG encoding
//!
//! # Example
//!
//! ```no_run
//! use exeta_backend_sheet::{
//!     generate_entity_sheet, save_sheet_result, AtlasIndex, FsAtlasLoader, SheetOptions,
//! };
//! use exeta_spec::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::from_path(Path::new("assets-editor-data.json")).unwrap();
//! let index = AtlasIndex::from_dir(Path::new("spritesheets")).unwrap();
//! let options = SheetOptions::default();
//!
//! for entity in &catalog.entities {
//!     let result = generate_entity_sheet(entity, &index, &FsAtlasLoader, &options).unwrap();
//!     save_sheet_result(&result, Path::new("output")).unwrap();
//! }
//! ```

pub mod atlas;
pub mod compose;
pub mod error;
pub mod indexer;
pub mod loader;
pub mod png;
pub mod sheet;
pub mod thumbnail;
pub mod tile;

// Re-export main types for convenience
pub use atlas::{parse_atlas_range, AtlasIndex, AtlasRange};
pub use compose::{compose_group, stack_groups, GroupCanvas, SheetLayout, DEFAULT_ROW_WIDTH};
pub use error::SheetError;
pub use indexer::{compute_indices, selected_coords, selected_sprite_ids};
pub use loader::{AtlasCache, AtlasLoader, FsAtlasLoader, MemoryAtlasLoader};
pub use png::{PngConfig, PngError};
pub use sheet::{
    generate_entity_sheet, save_sheet_result, sheet_path, thumbnail_path, EncodedImage,
    GroupReport, SavedSheet, SheetOptions, SheetResult, TilePlacement,
};
pub use thumbnail::{make_thumbnail, thumbnail_dimensions, THUMBNAIL_MAX};
pub use tile::{extract_tile, tile_rect, TileRect};
