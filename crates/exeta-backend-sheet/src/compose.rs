//! Grid placement of tiles and vertical stacking of frame groups.
//!
//! A group's selected tiles are split into chunks of `row_width` tiles. Tile
//! `n` belongs to chunk `n / row_width` at element `n % row_width`; the
//! [`SheetLayout`] decides which of those maps to the horizontal axis.

use std::fmt;
use std::str::FromStr;

use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Tiles per chunk when nothing else is configured (one per direction).
pub const DEFAULT_ROW_WIDTH: u32 = 4;

/// How chunk and element indices map onto the output grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SheetLayout {
    /// Chunks run left to right, elements top to bottom.
    ///
    /// Matches sheets produced by the existing asset pipeline: a group of
    /// `n` tiles is `T * ceil(n / row_width)` wide and `T * row_width` tall.
    #[default]
    Legacy,
    /// Chunks run top to bottom, elements left to right.
    RowMajor,
}

impl SheetLayout {
    /// Grid cell `(column, row)` of `element` inside `chunk`.
    pub fn cell(self, chunk: u32, element: u32) -> (u32, u32) {
        match self {
            SheetLayout::Legacy => (chunk, element),
            SheetLayout::RowMajor => (element, chunk),
        }
    }

    /// Grid size `(columns, rows)` for `num_chunks` chunks of `row_width`.
    pub fn grid_size(self, num_chunks: u32, row_width: u32) -> (u32, u32) {
        self.cell(num_chunks, row_width)
    }

    /// Name used on the command line and in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            SheetLayout::Legacy => "legacy",
            SheetLayout::RowMajor => "row-major",
        }
    }
}

impl fmt::Display for SheetLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(SheetLayout::Legacy),
            "row-major" | "row_major" | "rowmajor" => Ok(SheetLayout::RowMajor),
            other => Err(format!(
                "unknown layout '{}', expected 'legacy' or 'row-major'",
                other
            )),
        }
    }
}

/// Canvas for one frame group, sized for a known tile count.
#[derive(Debug, Clone)]
pub struct GroupCanvas {
    image: RgbaImage,
    tile_size: u32,
    row_width: u32,
    layout: SheetLayout,
}

impl GroupCanvas {
    /// Allocates a transparent canvas for `tile_count` tiles.
    ///
    /// A `row_width` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// [`SheetError::CanvasOverflow`] when the grid is too large for an image.
    pub fn new(
        tile_count: usize,
        tile_size: u32,
        row_width: u32,
        layout: SheetLayout,
    ) -> Result<Self, SheetError> {
        let row_width = row_width.max(1);
        let num_chunks = (tile_count as u64).div_ceil(u64::from(row_width));
        let (cols, rows) = match layout {
            SheetLayout::Legacy => (num_chunks, u64::from(row_width)),
            SheetLayout::RowMajor => (u64::from(row_width), num_chunks),
        };

        let (width, height) = match (
            pixel_extent(cols, tile_size),
            pixel_extent(rows, tile_size),
        ) {
            (Some(width), Some(height)) => (width, height),
            _ => {
                return Err(SheetError::CanvasOverflow {
                    width: cols.saturating_mul(u64::from(tile_size)),
                    height: rows.saturating_mul(u64::from(tile_size)),
                })
            }
        };

        Ok(Self {
            image: RgbaImage::new(width, height),
            tile_size,
            row_width,
            layout,
        })
    }

    /// Pixel offset of the `n`th tile.
    pub fn offset(&self, n: usize) -> (u32, u32) {
        let n = n as u64;
        let row_width = u64::from(self.row_width);
        // the constructor bounds both indices by the u32 pixel extent
        let (col, row) = self
            .layout
            .cell((n / row_width) as u32, (n % row_width) as u32);
        (col * self.tile_size, row * self.tile_size)
    }

    /// Pastes `tile` as the `n`th tile, replacing the pixels underneath.
    pub fn place(&mut self, n: usize, tile: &RgbaImage) -> (u32, u32) {
        let (x, y) = self.offset(n);
        imageops::replace(&mut self.image, tile, i64::from(x), i64::from(y));
        (x, y)
    }

    /// Finished group image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// `cells * tile_size` if it fits an image dimension.
fn pixel_extent(cells: u64, tile_size: u32) -> Option<u32> {
    cells
        .checked_mul(u64::from(tile_size))
        .and_then(|px| u32::try_from(px).ok())
}

/// Lays `tiles` out on a fresh group canvas.
pub fn compose_group(
    tiles: &[RgbaImage],
    tile_size: u32,
    row_width: u32,
    layout: SheetLayout,
) -> Result<RgbaImage, SheetError> {
    let mut canvas = GroupCanvas::new(tiles.len(), tile_size, row_width, layout)?;
    for (n, tile) in tiles.iter().enumerate() {
        canvas.place(n, tile);
    }
    Ok(canvas.into_image())
}

/// Stacks group images top to bottom at `x = 0`.
///
/// The result is as wide as the widest group and as tall as all groups
/// together.
///
/// # Errors
///
/// - [`SheetError::EmptySheet`] when there is nothing to stack
/// - [`SheetError::CanvasOverflow`] when the total height exceeds `u32`
pub fn stack_groups(groups: &[RgbaImage]) -> Result<RgbaImage, SheetError> {
    if groups.is_empty() {
        return Err(SheetError::EmptySheet);
    }

    let width = groups.iter().map(|g| g.width()).max().unwrap_or(0);
    let total: u64 = groups.iter().map(|g| u64::from(g.height())).sum();
    let height = u32::try_from(total).map_err(|_| SheetError::CanvasOverflow {
        width: u64::from(width),
        height: total,
    })?;

    let mut sheet = RgbaImage::new(width, height);
    let mut y = 0i64;
    for group in groups {
        imageops::replace(&mut sheet, group, 0, y);
        y += i64::from(group.height());
    }
    Ok(sheet)
}
