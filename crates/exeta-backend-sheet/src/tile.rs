//! Tile rectangles inside an atlas.
//!
//! Tiles are packed row-major with `atlas_width / tile_size` columns. An
//! atlas whose width is not a multiple of the tile size silently loses the
//! partial column; that is part of how atlases are built, not checked here.

use image::{imageops, RgbaImage};

use crate::error::SheetError;

/// Pixel rectangle of one square tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Edge length in pixels.
    pub size: u32,
}

/// Computes the rectangle of the tile at `offset`.
///
/// # Errors
///
/// - [`SheetError::InvalidTileSize`] when `tile_size` is zero
/// - [`SheetError::Bounds`] when the rectangle does not fit in the atlas
pub fn tile_rect(
    atlas_width: u32,
    atlas_height: u32,
    offset: u32,
    tile_size: u32,
) -> Result<TileRect, SheetError> {
    if tile_size == 0 {
        return Err(SheetError::InvalidTileSize(tile_size));
    }

    let bounds = || SheetError::Bounds {
        offset,
        tile_size,
        atlas_width,
        atlas_height,
    };

    let cols = atlas_width / tile_size;
    if cols == 0 {
        return Err(bounds());
    }

    let x = u64::from(offset % cols) * u64::from(tile_size);
    let y = u64::from(offset / cols) * u64::from(tile_size);
    let size = u64::from(tile_size);

    if x + size > u64::from(atlas_width) || y + size > u64::from(atlas_height) {
        return Err(bounds());
    }

    // Both fit inside the atlas dimensions, so they fit in u32.
    Ok(TileRect {
        x: x as u32,
        y: y as u32,
        size: tile_size,
    })
}

/// Crops the tile at `offset` out of `atlas`.
pub fn extract_tile(atlas: &RgbaImage, offset: u32, tile_size: u32) -> Result<RgbaImage, SheetError> {
    let (width, height) = atlas.dimensions();
    let rect = tile_rect(width, height, offset, tile_size)?;
    Ok(imageops::crop_imm(atlas, rect.x, rect.y, rect.size, rect.size).to_image())
}
