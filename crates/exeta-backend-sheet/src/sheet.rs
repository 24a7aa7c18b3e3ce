//! Per-entity sprite sheet generation.
//!
//! [`generate_entity_sheet`] resolves every selected sprite of every frame
//! group, lays the tiles out, stacks the groups and encodes the result, all
//! in memory. [`save_sheet_result`] then writes the files; nothing touches
//! the output directory until composition and encoding have both succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use exeta_spec::{EntityRecord, IntegrityError, SelectionFilter, SpriteInfo, SpritePattern};
use image::RgbaImage;

use crate::atlas::AtlasIndex;
use crate::compose::{stack_groups, GroupCanvas, SheetLayout, DEFAULT_ROW_WIDTH};
use crate::error::SheetError;
use crate::indexer::selected_sprite_ids;
use crate::loader::{AtlasCache, AtlasLoader};
use crate::png::{write_rgba_to_vec_with_hash, PngConfig};
use crate::thumbnail::{make_thumbnail, THUMBNAIL_MAX};
use crate::tile::extract_tile;

/// Name of the thumbnail subdirectory inside the output directory.
pub const THUMBS_DIR: &str = "thumbs";

/// Options for composing one entity.
#[derive(Debug, Clone)]
pub struct SheetOptions {
    /// Which pattern coordinates to include.
    pub filter: SelectionFilter,
    /// Tiles per chunk.
    pub row_width: u32,
    /// Chunk/element axis mapping.
    pub layout: SheetLayout,
    /// Thumbnail edge bound, or `None` to skip thumbnails.
    ///
    /// Only honoured when the filter selects everything.
    pub thumbnail_size: Option<u32>,
    /// PNG encoder settings.
    pub png: PngConfig,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            filter: SelectionFilter::any(),
            row_width: DEFAULT_ROW_WIDTH,
            layout: SheetLayout::Legacy,
            thumbnail_size: Some(THUMBNAIL_MAX),
            png: PngConfig::default(),
        }
    }
}

impl SheetOptions {
    /// Sets the selection filter.
    pub fn with_filter(mut self, filter: SelectionFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the layout.
    pub fn with_layout(mut self, layout: SheetLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the row width.
    pub fn with_row_width(mut self, row_width: u32) -> Self {
        self.row_width = row_width;
        self
    }

    /// Sets or disables the thumbnail bound.
    pub fn with_thumbnail_size(mut self, size: Option<u32>) -> Self {
        self.thumbnail_size = size;
        self
    }

    /// Thumbnail bound that applies to this run, if any.
    ///
    /// Filtered runs never produce thumbnails.
    pub fn effective_thumbnail_size(&self) -> Option<u32> {
        if self.filter.is_any() {
            self.thumbnail_size
        } else {
            None
        }
    }
}

/// Where one tile ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePlacement {
    /// Global sprite id.
    pub sprite_id: u32,
    /// Atlas the tile was cut from.
    pub atlas: PathBuf,
    /// Offset of the tile inside the atlas.
    pub local_offset: u32,
    /// Left edge in the final sheet.
    pub x: u32,
    /// Top edge in the final sheet.
    pub y: u32,
}

/// Summary of one frame group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    /// Position in the entity's frame group list.
    pub index: usize,
    /// Animation tag derived from the group label.
    pub tag: String,
    /// Sprite ids listed by the group.
    pub total_sprites: usize,
    /// Sprite ids accepted by the filter.
    pub selected: usize,
    /// Pattern problem tolerated by the unfiltered pipeline.
    ///
    /// Unfiltered runs place `spriteId` as listed without indexing the
    /// pattern, so a count mismatch is reported here instead of failing.
    pub integrity: Option<IntegrityError>,
    /// Group image width (zero when nothing was selected).
    pub width: u32,
    /// Group image height (zero when nothing was selected).
    pub height: u32,
    /// Placement of every selected tile, in placement order.
    pub placements: Vec<TilePlacement>,
}

/// An image together with its encoded PNG.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Decoded pixels.
    pub image: RgbaImage,
    /// PNG bytes.
    pub png_data: Vec<u8>,
    /// BLAKE3 hash of `png_data`.
    pub hash: String,
}

/// Result of composing one entity.
#[derive(Debug, Clone)]
pub struct SheetResult {
    /// Entity id from the catalog.
    pub entity_id: u32,
    /// Composed sheet.
    pub sheet: EncodedImage,
    /// Thumbnail, when enabled for the run.
    pub thumbnail: Option<EncodedImage>,
    /// Per-group details, in frame group order.
    pub groups: Vec<GroupReport>,
    /// Atlases decoded for this entity, sorted.
    pub atlases_used: Vec<PathBuf>,
}

impl SheetResult {
    /// Sheet width in pixels.
    pub fn width(&self) -> u32 {
        self.sheet.image.width()
    }

    /// Sheet height in pixels.
    pub fn height(&self) -> u32 {
        self.sheet.image.height()
    }

    /// Number of tiles placed across all groups.
    pub fn tile_count(&self) -> usize {
        self.groups.iter().map(|g| g.selected).sum()
    }
}

fn encode(image: RgbaImage, config: &PngConfig) -> Result<EncodedImage, SheetError> {
    let (png_data, hash) = write_rgba_to_vec_with_hash(&image, config)?;
    Ok(EncodedImage {
        image,
        png_data,
        hash,
    })
}

/// Sprite ids a frame group contributes, in placement order.
///
/// With no filter the ids are taken verbatim and a pattern problem is
/// returned alongside them. A filtered selection needs the pattern, so
/// there it is an error.
fn group_sprite_ids(
    group_index: usize,
    info: &SpriteInfo,
    filter: &SelectionFilter,
) -> Result<(Vec<u32>, Option<IntegrityError>), SheetError> {
    match SpritePattern::from_info(info) {
        Ok(pattern) => Ok((selected_sprite_ids(&pattern, filter), None)),
        Err(source) if filter.is_any() => Ok((info.sprite_ids.clone(), Some(source))),
        Err(source) => Err(SheetError::Integrity {
            group: group_index,
            source,
        }),
    }
}

/// Composes the sprite sheet of one entity.
///
/// Atlases are decoded through a cache that lives only for this call. Every
/// tile of a group is resolved and cut before the group canvas is allocated.
///
/// # Errors
///
/// Any failure aborts the entity: integrity problems in a filtered frame
/// group, a sprite id that resolves to no atlas or out of its bounds, an
/// atlas that cannot be decoded, a sheet too large to allocate, or a filter
/// that selects nothing in every group.
pub fn generate_entity_sheet(
    entity: &EntityRecord,
    index: &AtlasIndex,
    loader: &dyn AtlasLoader,
    options: &SheetOptions,
) -> Result<SheetResult, SheetError> {
    let tile_size = entity.size;
    if tile_size == 0 {
        return Err(SheetError::InvalidTileSize(tile_size));
    }

    let mut cache = AtlasCache::new(loader);
    let mut images = Vec::new();
    let mut groups = Vec::with_capacity(entity.frame_groups.len());
    let mut y_offset = 0u64;

    for (group_index, group) in entity.frame_groups.iter().enumerate() {
        let (sprite_ids, integrity) =
            group_sprite_ids(group_index, &group.sprite_info, &options.filter)?;

        let mut report = GroupReport {
            index: group_index,
            tag: group.animation_tag(),
            total_sprites: group.sprite_info.sprite_ids.len(),
            selected: sprite_ids.len(),
            integrity,
            width: 0,
            height: 0,
            placements: Vec::with_capacity(sprite_ids.len()),
        };

        if sprite_ids.is_empty() {
            groups.push(report);
            continue;
        }

        let mut tiles = Vec::with_capacity(sprite_ids.len());
        for &sprite_id in &sprite_ids {
            let (range, local_offset) = index.resolve(sprite_id)?;
            let atlas = cache.get(&range.path)?;
            tiles.push(extract_tile(atlas, local_offset, tile_size)?);
            report.placements.push(TilePlacement {
                sprite_id,
                atlas: range.path.clone(),
                local_offset,
                x: 0,
                y: 0,
            });
        }

        let mut canvas =
            GroupCanvas::new(tiles.len(), tile_size, options.row_width, options.layout)?;
        for (n, (tile, placement)) in tiles.iter().zip(&mut report.placements).enumerate() {
            let (x, y) = canvas.place(n, tile);
            placement.x = x;
            placement.y = u32::try_from(y_offset + u64::from(y)).map_err(|_| {
                SheetError::CanvasOverflow {
                    width: u64::from(x),
                    height: y_offset + u64::from(y),
                }
            })?;
        }

        let image = canvas.into_image();
        report.width = image.width();
        report.height = image.height();
        y_offset += u64::from(image.height());

        images.push(image);
        groups.push(report);
    }

    let sheet = stack_groups(&images)?;

    let thumbnail = match options.effective_thumbnail_size() {
        Some(max) => Some(encode(make_thumbnail(&sheet, max), &options.png)?),
        None => None,
    };
    let sheet = encode(sheet, &options.png)?;

    Ok(SheetResult {
        entity_id: entity.id,
        sheet,
        thumbnail,
        groups,
        atlases_used: cache.paths(),
    })
}

/// Output path of an entity's sheet.
pub fn sheet_path(out_dir: &Path, entity_id: u32) -> PathBuf {
    out_dir.join(format!("character_{}.png", entity_id))
}

/// Output path of an entity's thumbnail.
pub fn thumbnail_path(out_dir: &Path, entity_id: u32) -> PathBuf {
    out_dir
        .join(THUMBS_DIR)
        .join(format!("character_{}_thumb.png", entity_id))
}

/// Files written for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSheet {
    /// Path of the sheet.
    pub sheet: PathBuf,
    /// Path of the thumbnail, if one was written.
    pub thumbnail: Option<PathBuf>,
}

/// Writes `data` next to `path` and renames it into place.
///
/// On failure the temporary file is removed and `path` is left untouched.
fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("png.tmp");
    let written = fs::write(&temp_path, data).and_then(|_| fs::rename(&temp_path, path));
    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

/// Writes a composed sheet (and its thumbnail) under `out_dir`.
///
/// Each file is written to a temporary name and renamed into place. If the
/// thumbnail cannot be written the sheet written just before it is removed
/// again, so a failure leaves no files behind for the entity.
pub fn save_sheet_result(result: &SheetResult, out_dir: &Path) -> Result<SavedSheet, SheetError> {
    fs::create_dir_all(out_dir)?;

    let sheet = sheet_path(out_dir, result.entity_id);
    write_atomic(&sheet, &result.sheet.png_data)?;

    let thumbnail = match &result.thumbnail {
        Some(thumb) => {
            let path = thumbnail_path(out_dir, result.entity_id);
            let written = path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|_| write_atomic(&path, &thumb.png_data));
            if let Err(err) = written {
                let _ = fs::remove_file(&sheet);
                return Err(err.into());
            }
            Some(path)
        }
        None => None,
    };

    Ok(SavedSheet { sheet, thumbnail })
}
