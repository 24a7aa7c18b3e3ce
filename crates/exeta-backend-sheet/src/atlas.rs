//! Atlas range table and sprite id lookup.
//!
//! Every source atlas covers a contiguous, inclusive range of global sprite
//! ids encoded in its file name: the first two runs of digits anywhere in
//! the name are the start and end ids (`90-120.png`, `sprites-90-120.png`).
//!
//! The table is built once from the atlas directory, sorted by start id and
//! searched with binary search. Ranges must not overlap; this is a
//! precondition of the atlas directory and is not validated.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::SheetError;

/// File extension of atlas images.
pub const ATLAS_EXTENSION: &str = "png";

static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| Regex::new(r"\d+").expect("invalid regex pattern"))
}

/// Parses the inclusive sprite id range encoded in an atlas file name.
///
/// # Errors
///
/// Returns [`SheetError::Format`] when the name has fewer than two numeric
/// tokens, when a token does not fit in a `u32`, or when start exceeds end.
pub fn parse_atlas_range(file_name: &str) -> Result<(u32, u32), SheetError> {
    let mut numbers = number_regex().find_iter(file_name).map(|m| m.as_str());

    let (Some(start), Some(end)) = (numbers.next(), numbers.next()) else {
        return Err(SheetError::Format(file_name.to_string()));
    };

    let start: u32 = start
        .parse()
        .map_err(|_| SheetError::Format(file_name.to_string()))?;
    let end: u32 = end
        .parse()
        .map_err(|_| SheetError::Format(file_name.to_string()))?;

    if start > end {
        return Err(SheetError::Format(file_name.to_string()));
    }

    Ok((start, end))
}

/// One source atlas and the sprite ids it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasRange {
    /// First sprite id in the atlas (inclusive).
    pub start_id: u32,
    /// Last sprite id in the atlas (inclusive).
    pub end_id: u32,
    /// Path of the atlas image.
    pub path: PathBuf,
}

impl AtlasRange {
    /// Creates a range for an atlas file.
    pub fn new(start_id: u32, end_id: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            start_id,
            end_id,
            path: path.into(),
        }
    }

    /// Builds a range by parsing the file name of `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, SheetError> {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (start_id, end_id) = parse_atlas_range(&name)?;
        Ok(Self::new(start_id, end_id, path))
    }

    /// Returns true if `sprite_id` is inside the range.
    pub fn contains(&self, sprite_id: u32) -> bool {
        self.start_id <= sprite_id && sprite_id <= self.end_id
    }

    /// Number of sprite ids covered.
    pub fn len(&self) -> u64 {
        u64::from(self.end_id) - u64::from(self.start_id) + 1
    }

    /// A range always covers at least one id.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Atlas file name, for messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Position of `sprite_id` inside this atlas.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::OutOfBounds`] when the id is outside the range.
    pub fn local_offset(&self, sprite_id: u32) -> Result<u32, SheetError> {
        if !self.contains(sprite_id) {
            return Err(SheetError::OutOfBounds {
                sprite_id,
                start_id: self.start_id,
                end_id: self.end_id,
                file: self.file_name(),
            });
        }
        Ok(sprite_id - self.start_id)
    }
}

/// Immutable lookup table of atlas ranges.
#[derive(Debug, Clone, Default)]
pub struct AtlasIndex {
    ranges: Vec<AtlasRange>,
}

impl AtlasIndex {
    /// Builds an index from ranges in any order.
    pub fn from_ranges(mut ranges: Vec<AtlasRange>) -> Self {
        ranges.sort_by(|a, b| {
            a.start_id
                .cmp(&b.start_id)
                .then(a.end_id.cmp(&b.end_id))
                .then_with(|| a.path.cmp(&b.path))
        });
        Self { ranges }
    }

    /// Scans `dir` (not recursively) for atlas images and parses their ranges.
    ///
    /// Files without the `.png` extension are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Io`] if the directory cannot be read and
    /// [`SheetError::Format`] for an atlas whose name encodes no range.
    pub fn from_dir(dir: &Path) -> Result<Self, SheetError> {
        let mut ranges = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || !is_atlas_file(entry.path()) {
                continue;
            }
            ranges.push(AtlasRange::from_path(entry.path())?);
        }

        Ok(Self::from_ranges(ranges))
    }

    /// Finds the atlas containing `sprite_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::NotFound`] if no range contains the id.
    pub fn locate(&self, sprite_id: u32) -> Result<&AtlasRange, SheetError> {
        let upper = self.ranges.partition_point(|r| r.start_id <= sprite_id);
        upper
            .checked_sub(1)
            .map(|i| &self.ranges[i])
            .filter(|r| r.contains(sprite_id))
            .ok_or(SheetError::NotFound { sprite_id })
    }

    /// Finds the atlas containing `sprite_id` and the id's offset inside it.
    pub fn resolve(&self, sprite_id: u32) -> Result<(&AtlasRange, u32), SheetError> {
        let range = self.locate(sprite_id)?;
        let offset = range.local_offset(sprite_id)?;
        Ok((range, offset))
    }

    /// Ranges sorted by start id.
    pub fn ranges(&self) -> &[AtlasRange] {
        &self.ranges
    }

    /// Number of atlases.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if no atlas was found.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn is_atlas_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ATLAS_EXTENSION))
}
