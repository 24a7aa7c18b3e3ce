//! Locate command implementation
//!
//! Resolves a single sprite id against the atlas directory.

use anyhow::{Context, Result};
use colored::Colorize;
use exeta_backend_sheet::{tile_rect, AtlasIndex, SheetError, TileRect};
use exeta_spec::BackendError;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

/// Tile rectangle in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RectOutput {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl From<TileRect> for RectOutput {
    fn from(rect: TileRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            size: rect.size,
        }
    }
}

/// Result of resolving one sprite id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocateOutput {
    pub sprite_id: u32,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atlas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<RectOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Resolves `sprite_id` and, with a tile size, its pixel rectangle.
pub fn locate(index: &AtlasIndex, sprite_id: u32, size: Option<u32>) -> LocateOutput {
    let mut output = LocateOutput {
        sprite_id,
        found: false,
        atlas: None,
        start_id: None,
        end_id: None,
        local_offset: None,
        rect: None,
        error_code: None,
        error: None,
    };

    let resolved = index.resolve(sprite_id).and_then(|(range, offset)| {
        output.atlas = Some(range.path.display().to_string());
        output.start_id = Some(range.start_id);
        output.end_id = Some(range.end_id);
        output.local_offset = Some(offset);

        match size {
            Some(size) => {
                let (width, height) =
                    image::image_dimensions(&range.path).map_err(|source| SheetError::AtlasLoad {
                        path: range.path.clone(),
                        source,
                    })?;
                tile_rect(width, height, offset, size).map(Some)
            }
            None => Ok(None),
        }
    });

    match resolved {
        Ok(rect) => {
            output.found = true;
            output.rect = rect.map(RectOutput::from);
        }
        Err(err) => {
            output.error_code = Some(err.code().to_string());
            output.error = Some(err.message());
        }
    }

    output
}

/// Run the locate command
///
/// # Returns
/// Exit code: 0 if the sprite resolved, 1 otherwise
pub fn run(atlas_dir: &Path, sprite_id: u32, size: Option<u32>, json: bool) -> Result<ExitCode> {
    let index = AtlasIndex::from_dir(atlas_dir).with_context(|| {
        format!("Failed to index atlas directory: {}", atlas_dir.display())
    })?;

    let output = locate(&index, sprite_id, size);

    if json {
        let text = serde_json::to_string_pretty(&output).context("Failed to serialize result")?;
        println!("{}", text);
    } else {
        print_human(&output);
    }

    Ok(if output.found {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_human(output: &LocateOutput) {
    println!("{} {}", "Sprite:".cyan().bold(), output.sprite_id);

    if let (Some(atlas), Some(start), Some(end)) = (&output.atlas, output.start_id, output.end_id) {
        println!("{} {} ({}-{})", "Atlas:".cyan().bold(), atlas, start, end);
    }
    if let Some(offset) = output.local_offset {
        println!("{} {}", "Local offset:".cyan().bold(), offset);
    }
    if let Some(rect) = &output.rect {
        println!(
            "{} x={} y={} size={}",
            "Tile:".cyan().bold(),
            rect.x,
            rect.y,
            rect.size
        );
    }
    if let Some(error) = &output.error {
        println!(
            "{} {} {}",
            "[ERROR]".red(),
            error,
            output.error_code.as_deref().unwrap_or_default().dimmed()
        );
    }
}
