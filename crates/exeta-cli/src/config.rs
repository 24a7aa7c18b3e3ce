//! Extraction run configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) is
//! a valid configuration. Command-line flags are applied on top of the file
//! through [`ExtractOverrides`].

use anyhow::{Context, Result};
use exeta_backend_sheet::{PngConfig, SheetLayout, SheetOptions, DEFAULT_ROW_WIDTH, THUMBNAIL_MAX};
use exeta_spec::{FilterError, SelectionFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default catalog file.
pub const DEFAULT_CATALOG: &str = "assets-editor-data.json";
/// Default atlas directory.
pub const DEFAULT_ATLAS_DIR: &str = "spritesheets";
/// Default output directory.
pub const DEFAULT_OUT_DIR: &str = "output";

/// Selection filter as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub frame: Option<u32>,
    pub direction: Option<u32>,
    pub addon: Option<u32>,
    pub mount: Option<u32>,
    /// Accepted layers in order; absent means all layers.
    pub layers: Option<Vec<u32>>,
}

impl FilterConfig {
    /// Builds the selection filter.
    ///
    /// An explicit empty layer list is rejected.
    pub fn to_filter(&self) -> Result<SelectionFilter, FilterError> {
        let mut filter = SelectionFilter {
            frame: self.frame,
            direction: self.direction,
            addon: self.addon,
            mount: self.mount,
            ..SelectionFilter::default()
        };
        if let Some(layers) = &self.layers {
            filter = filter.with_layers(layers.iter().copied())?;
        }
        Ok(filter)
    }
}

/// Configuration of an `extract` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Catalog JSON file.
    pub catalog: PathBuf,
    /// Directory of source atlases.
    pub atlas_dir: PathBuf,
    /// Output directory for sheets and thumbnails.
    pub out_dir: PathBuf,
    /// Tiles per chunk.
    pub row_width: u32,
    /// Thumbnail edge bound in pixels.
    pub thumbnail_size: u32,
    /// Grid layout of each frame group.
    pub layout: SheetLayout,
    /// Whether unfiltered runs write thumbnails.
    pub thumbnails: bool,
    /// Sprite selection.
    pub filter: FilterConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(DEFAULT_CATALOG),
            atlas_dir: PathBuf::from(DEFAULT_ATLAS_DIR),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            row_width: DEFAULT_ROW_WIDTH,
            thumbnail_size: THUMBNAIL_MAX,
            layout: SheetLayout::default(),
            thumbnails: true,
            filter: FilterConfig::default(),
        }
    }
}

impl ExtractConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse extract configuration")
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Composer options for this run.
    pub fn sheet_options(&self) -> Result<SheetOptions> {
        let filter = self
            .filter
            .to_filter()
            .context("Invalid sprite selection filter")?;
        Ok(SheetOptions {
            filter,
            row_width: self.row_width,
            layout: self.layout,
            thumbnail_size: self.thumbnails.then_some(self.thumbnail_size),
            png: PngConfig::default(),
        })
    }
}

/// Command-line values that replace configuration entries when present.
#[derive(Debug, Clone, Default)]
pub struct ExtractOverrides {
    pub catalog: Option<PathBuf>,
    pub atlas_dir: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub row_width: Option<u32>,
    pub layout: Option<SheetLayout>,
    pub no_thumbnails: bool,
    pub frame: Option<u32>,
    pub direction: Option<u32>,
    pub addon: Option<u32>,
    pub mount: Option<u32>,
    pub layers: Option<Vec<u32>>,
}

impl ExtractOverrides {
    /// Applies the overrides to `config`.
    pub fn apply(self, config: &mut ExtractConfig) {
        if let Some(catalog) = self.catalog {
            config.catalog = catalog;
        }
        if let Some(atlas_dir) = self.atlas_dir {
            config.atlas_dir = atlas_dir;
        }
        if let Some(out_dir) = self.out_dir {
            config.out_dir = out_dir;
        }
        if let Some(row_width) = self.row_width {
            config.row_width = row_width;
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if self.no_thumbnails {
            config.thumbnails = false;
        }

        let filter = &mut config.filter;
        filter.frame = self.frame.or(filter.frame);
        filter.direction = self.direction.or(filter.direction);
        filter.addon = self.addon.or(filter.addon);
        filter.mount = self.mount.or(filter.mount);
        if self.layers.is_some() {
            filter.layers = self.layers;
        }
    }
}
