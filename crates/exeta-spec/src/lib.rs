//! Exeta Catalog Library
//!
//! This crate provides the data model shared by the Exeta sprite sheet
//! extractor: the entity catalog, validated sprite patterns, selection filters
//! and the error types every backend reports through.
//!
//! # Overview
//!
//! A catalog is a JSON array of entity records. Each entity owns one or more
//! frame groups, and each frame group describes a five-axis sprite pattern
//! (frame × mount × addon × direction × layer) over a flat list of global
//! sprite identifiers.
//!
//! # Example
//!
//! ```
//! use exeta_spec::{Catalog, SelectionFilter, SpritePattern};
//!
//! let json = r#"[
//!   {
//!     "id": 1,
//!     "size": 32,
//!     "frameGroup": [
//!       {
//!         "fixedFrameGroup": "FRAME_GROUP_IDLE",
//!         "spriteInfo": {
//!           "patternWidth": 4,
//!           "patternHeight": 1,
//!           "patternDepth": 1,
//!           "layers": 1,
//!           "spriteId": [100, 101, 102, 103]
//!         }
//!       }
//!     ]
//!   }
//! ]"#;
//!
//! let catalog = Catalog::from_json(json).unwrap();
//! let entity = &catalog.entities[0];
//! let group = &entity.frame_groups[0];
//! assert_eq!(group.animation_tag(), "idle");
//!
//! let pattern = SpritePattern::from_info(&group.sprite_info).unwrap();
//! assert_eq!(pattern.len(), 4);
//!
//! let filter = SelectionFilter::any().with_direction(2);
//! assert_eq!(filter.direction, Some(2));
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Catalog records as they appear in the metadata JSON
//! - [`pattern`]: Validated five-axis sprite patterns
//! - [`filter`]: Per-dimension selection filters
//! - [`error`]: Error types and the [`BackendError`] trait

pub mod catalog;
pub mod error;
pub mod filter;
pub mod pattern;

// Re-export commonly used types at the crate root
pub use catalog::{Animation, Catalog, EntityRecord, FrameGroup, SpriteInfo};
pub use error::{BackendError, CatalogError, FilterError, IntegrityError};
pub use filter::{LayerSelection, SelectionFilter};
pub use pattern::{PatternCoord, SpritePattern};
