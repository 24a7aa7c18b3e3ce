//! CLI argument definitions for the `exeta` binary.
//!
//! All clap types are defined here, keeping `main.rs` focused on dispatch.

use clap::{Args, Parser, Subcommand};
use exeta_backend_sheet::SheetLayout;
use std::path::PathBuf;

use exeta_cli::config::{FilterConfig, DEFAULT_ATLAS_DIR, DEFAULT_CATALOG};

/// Exeta - rebuild per-entity sprite sheets from packed atlases
#[derive(Parser)]
#[command(name = "exeta")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Sprite selection flags shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Only this animation frame
    #[arg(long)]
    pub frame: Option<u32>,

    /// Only this direction (0=north, 1=east, 2=south, 3=west)
    #[arg(long)]
    pub direction: Option<u32>,

    /// Only this addon (0 = base outfit)
    #[arg(long)]
    pub addon: Option<u32>,

    /// Only this mount (0 = unmounted)
    #[arg(long)]
    pub mount: Option<u32>,

    /// Accepted layers, in order (e.g. 0,1)
    #[arg(long, value_delimiter = ',')]
    pub layers: Option<Vec<u32>>,
}

impl FilterArgs {
    /// The flags as a config file filter block.
    pub fn into_config(self) -> FilterConfig {
        FilterConfig {
            frame: self.frame,
            direction: self.direction,
            addon: self.addon,
            mount: self.mount,
            layers: self.layers,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build a sprite sheet for every entity in the catalog
    Extract {
        /// Path to a JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Catalog JSON file (default: assets-editor-data.json)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Directory of source atlases (default: spritesheets)
        #[arg(long)]
        atlas_dir: Option<PathBuf>,

        /// Output directory (default: output)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Tiles per chunk (default: 4)
        #[arg(long)]
        row_width: Option<u32>,

        /// Grid layout of each frame group (legacy, row-major)
        #[arg(long)]
        layout: Option<SheetLayout>,

        /// Do not write thumbnails
        #[arg(long)]
        no_thumbnails: bool,

        #[command(flatten)]
        filter: FilterArgs,

        /// Only process this entity id (repeatable)
        #[arg(long = "only")]
        only: Vec<u32>,

        /// Hide per-animation progress lines
        #[arg(short, long)]
        quiet: bool,

        /// Print only the summary as JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Also write the summary JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Resolve one sprite id to its atlas, offset and tile rectangle
    Locate {
        /// Directory of source atlases
        #[arg(long, default_value = DEFAULT_ATLAS_DIR)]
        atlas_dir: PathBuf,

        /// Global sprite id
        #[arg(short, long)]
        sprite: u32,

        /// Tile size in pixels; also prints the tile rectangle
        #[arg(long)]
        size: Option<u32>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show pattern dimensions and index order of one entity
    Inspect {
        /// Catalog JSON file
        #[arg(short, long, default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,

        /// Entity id
        #[arg(long)]
        id: u32,

        #[command(flatten)]
        filter: FilterArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
