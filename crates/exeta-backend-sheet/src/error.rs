//! Errors from atlas resolution and sheet composition.

use std::path::PathBuf;

use exeta_spec::{BackendError, IntegrityError};
use thiserror::Error;

use crate::png::PngError;

/// Errors that can occur while building an entity's sprite sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    /// No atlas range contains the sprite id.
    #[error("Sprite ID {sprite_id} not found in any sprite sheet")]
    NotFound { sprite_id: u32 },

    /// The sprite id lies outside the range of the atlas it was matched to.
    #[error("Sprite ID {sprite_id} is out of bounds for file {file} ({start_id}-{end_id})")]
    OutOfBounds {
        sprite_id: u32,
        start_id: u32,
        end_id: u32,
        file: String,
    },

    /// The tile rectangle for an offset does not fit inside the atlas.
    #[error(
        "Tile at offset {offset} ({tile_size}px) exceeds atlas bounds {atlas_width}x{atlas_height}"
    )]
    Bounds {
        offset: u32,
        tile_size: u32,
        atlas_width: u32,
        atlas_height: u32,
    },

    /// An atlas file name does not encode a sprite id range.
    #[error("Invalid atlas filename format: {0}")]
    Format(String),

    /// A frame group's sprite ids disagree with its pattern dimensions.
    #[error("Frame group {group}: {source}")]
    Integrity {
        group: usize,
        #[source]
        source: IntegrityError,
    },

    /// Tile size must be positive.
    #[error("Invalid tile size {0}: must be at least 1 pixel")]
    InvalidTileSize(u32),

    /// The composed image would not fit in `u32` pixel dimensions.
    #[error("Composed image of {width}x{height} pixels exceeds the maximum image size")]
    CanvasOverflow { width: u64, height: u64 },

    /// Every frame group selected zero sprites.
    #[error("Entity produced no sprites to compose")]
    EmptySheet,

    /// The atlas image could not be opened or decoded.
    #[error("Failed to load atlas {}: {source}", path.display())]
    AtlasLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    Png(#[from] PngError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for SheetError {
    fn code(&self) -> &'static str {
        match self {
            SheetError::NotFound { .. } => "SHEET_001",
            SheetError::OutOfBounds { .. } => "SHEET_002",
            SheetError::Bounds { .. } => "SHEET_003",
            SheetError::Format(_) => "SHEET_004",
            SheetError::Integrity { .. } => "SHEET_005",
            SheetError::InvalidTileSize(_) => "SHEET_006",
            SheetError::EmptySheet => "SHEET_007",
            SheetError::AtlasLoad { .. } => "SHEET_008",
            SheetError::Png(_) => "SHEET_009",
            SheetError::Io(_) => "SHEET_010",
            SheetError::CanvasOverflow { .. } => "SHEET_011",
        }
    }

    fn category(&self) -> &'static str {
        "sheet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = SheetError::NotFound { sprite_id: 500 };
        assert_eq!(err.to_string(), "Sprite ID 500 not found in any sprite sheet");
        assert_eq!(err.code(), "SHEET_001");
        assert_eq!(err.category(), "sheet");
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = SheetError::OutOfBounds {
            sprite_id: 10,
            start_id: 90,
            end_id: 120,
            file: "90-120.png".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Sprite ID 10 is out of bounds for file 90-120.png (90-120)"
        );
        assert_eq!(err.code(), "SHEET_002");
    }

    #[test]
    fn test_integrity_wraps_source() {
        let err = SheetError::Integrity {
            group: 1,
            source: IntegrityError::ZeroDimension("layers"),
        };
        assert_eq!(
            err.to_string(),
            "Frame group 1: pattern dimension 'layers' must be at least 1"
        );
        assert_eq!(err.code(), "SHEET_005");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            SheetError::NotFound { sprite_id: 0 },
            SheetError::Format("x".into()),
            SheetError::InvalidTileSize(0),
            SheetError::EmptySheet,
            SheetError::CanvasOverflow {
                width: 1,
                height: 1,
            },
            SheetError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
