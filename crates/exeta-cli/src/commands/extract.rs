//! Extract command implementation
//!
//! Builds one sprite sheet per catalog entity. Failures are isolated per
//! entity: a broken entity is reported and the run moves on to the next one.

use anyhow::{Context, Result};
use colored::Colorize;
use exeta_backend_sheet::{
    generate_entity_sheet, save_sheet_result, AtlasIndex, FsAtlasLoader, GroupReport,
    SheetOptions,
};
use exeta_spec::{BackendError, Catalog, EntityRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use crate::config::{ExtractConfig, FilterConfig};
use crate::status::Status;

/// Run-level switches that are not part of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ExtractRun {
    /// Restrict the run to these entity ids (empty means all).
    pub only: Vec<u32>,
    /// Hide per-group lines.
    pub quiet: bool,
    /// Print only the summary JSON.
    pub json: bool,
    /// Also write the summary JSON to this path.
    pub report: Option<PathBuf>,
}

/// Result of one frame group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Position in the entity's frame group list
    pub index: usize,
    /// Animation tag
    pub tag: String,
    /// Sprite ids listed by the group
    pub sprites: usize,
    /// Sprite ids placed on the sheet
    pub selected: usize,
    /// Group image width in pixels
    pub width: u32,
    /// Group image height in pixels
    pub height: u32,
    /// Pattern mismatch tolerated for this group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<&GroupReport> for GroupSummary {
    fn from(report: &GroupReport) -> Self {
        Self {
            index: report.index,
            tag: report.tag.clone(),
            sprites: report.total_sprites,
            selected: report.selected,
            width: report.width,
            height: report.height,
            warning: report.integrity.as_ref().map(ToString::to_string),
        }
    }
}

/// Result of processing a single entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityResult {
    /// Entity id
    pub entity_id: u32,
    /// Tile size from the catalog
    pub tile_size: u32,
    /// Whether the sheet was written
    pub success: bool,
    /// Stable error code if failed
    pub error_code: Option<String>,
    /// Error message if failed
    pub error: Option<String>,
    /// Path of the written sheet
    pub sheet_path: Option<String>,
    /// Path of the written thumbnail
    pub thumbnail_path: Option<String>,
    /// Sheet width in pixels
    pub width: u32,
    /// Sheet height in pixels
    pub height: u32,
    /// Tiles placed on the sheet
    pub tiles: usize,
    /// BLAKE3 hash of the sheet PNG
    pub hash: Option<String>,
    /// Frame group details
    pub groups: Vec<GroupSummary>,
    /// Processing time in milliseconds
    pub duration_ms: u64,
}

/// Summary report for a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// RFC 3339 timestamp of the run
    pub timestamp: String,
    /// Catalog file
    pub catalog: String,
    /// Atlas directory
    pub atlas_dir: String,
    /// Output directory
    pub out_dir: String,
    /// Grid layout used
    pub layout: String,
    /// Selection filter used
    pub filter: FilterConfig,
    /// Entities processed
    pub total_entities: usize,
    /// Sheets written
    pub successful: usize,
    /// Entities that failed
    pub failed: usize,
    /// Total runtime in seconds
    pub runtime_seconds: f64,
    /// Per-entity results in catalog order
    pub entities: Vec<EntityResult>,
}

impl ExtractionSummary {
    /// Process exit code for this summary: 1 if any entity failed.
    pub fn exit_code(&self) -> ExitCode {
        if self.failed > 0 {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}

/// Run the extract command
///
/// # Returns
/// Exit code: 0 success, 1 if any entity failed
pub fn run(config: &ExtractConfig, run: &ExtractRun) -> Result<ExitCode> {
    let status = Status::new(run.quiet, run.json);
    let summary = extract(config, run, &status)?;

    if run.json {
        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", json);
    } else {
        print_summary(&summary);
    }

    if let Some(report) = &run.report {
        write_report(&summary, report)?;
        status.info(&format!("Summary report: {}", report.display()));
    }

    Ok(summary.exit_code())
}

/// Runs the extraction and returns the summary without printing it.
pub fn extract(config: &ExtractConfig, run: &ExtractRun, status: &Status) -> Result<ExtractionSummary> {
    let start = Instant::now();

    status.banner("Exeta - Sprite Sheet Extractor");
    status.info("Initializing...");

    let options = config.sheet_options()?;

    if !config.out_dir.exists() {
        fs::create_dir_all(&config.out_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                config.out_dir.display()
            )
        })?;
        status.info(&format!(
            "Created output directory: {}",
            config.out_dir.display()
        ));
    }

    status.info(&format!(
        "Loading catalog from {}...",
        config.catalog.display()
    ));
    let catalog = Catalog::from_path(&config.catalog)
        .with_context(|| format!("Failed to load catalog: {}", config.catalog.display()))?;
    status.info(&format!("Loaded {} character entries.", catalog.len()));

    let index = AtlasIndex::from_dir(&config.atlas_dir).with_context(|| {
        format!(
            "Failed to index atlas directory: {}",
            config.atlas_dir.display()
        )
    })?;
    status.info(&format!(
        "Indexed {} sprite atlases in {}",
        index.len(),
        config.atlas_dir.display()
    ));
    if index.is_empty() {
        status.warn("No atlases found; every entity will fail to resolve its sprites");
    }

    status.info(&format!(
        "Layout: {} (row width {})",
        options.layout, options.row_width
    ));
    if !options.filter.is_any() {
        status.warn("Selection filter active; thumbnails are not written for filtered sheets");
    }

    let entities = select_entities(&catalog, &run.only, status);
    status.blank();

    let mut results = Vec::with_capacity(entities.len());
    for entity in entities {
        results.push(process_entity(entity, &index, &options, &config.out_dir, status));
    }

    let successful = results.iter().filter(|r| r.success).count();
    let failed = results.len() - successful;

    Ok(ExtractionSummary {
        timestamp: chrono::Utc::now().to_rfc3339(),
        catalog: config.catalog.display().to_string(),
        atlas_dir: config.atlas_dir.display().to_string(),
        out_dir: config.out_dir.display().to_string(),
        layout: options.layout.to_string(),
        filter: config.filter.clone(),
        total_entities: results.len(),
        successful,
        failed,
        runtime_seconds: start.elapsed().as_secs_f64(),
        entities: results,
    })
}

/// Entities to process, in catalog order.
fn select_entities<'a>(catalog: &'a Catalog, only: &[u32], status: &Status) -> Vec<&'a EntityRecord> {
    if only.is_empty() {
        return catalog.entities.iter().collect();
    }

    for id in only {
        if catalog.find(*id).is_none() {
            status.warn(&format!("Character ID {} is not in the catalog", id));
        }
    }

    catalog
        .entities
        .iter()
        .filter(|entity| only.contains(&entity.id))
        .collect()
}

/// Process a single entity
fn process_entity(
    entity: &EntityRecord,
    index: &AtlasIndex,
    options: &SheetOptions,
    out_dir: &Path,
    status: &Status,
) -> EntityResult {
    let start = Instant::now();

    status.info(&format!(
        "Generating spritesheet for character ID {} (sprite size: {})",
        entity.id, entity.size
    ));

    let mut result = EntityResult {
        entity_id: entity.id,
        tile_size: entity.size,
        success: false,
        error_code: None,
        error: None,
        sheet_path: None,
        thumbnail_path: None,
        width: 0,
        height: 0,
        tiles: 0,
        hash: None,
        groups: Vec::new(),
        duration_ms: 0,
    };

    let outcome = generate_entity_sheet(entity, index, &FsAtlasLoader, options).and_then(|sheet| {
        let saved = save_sheet_result(&sheet, out_dir)?;
        Ok((sheet, saved))
    });

    match outcome {
        Ok((sheet, saved)) => {
            for group in &sheet.groups {
                if let Some(problem) = &group.integrity {
                    status.warn(&format!(
                        "Animation '{}' of character ID {}: {}; sprite IDs placed as listed",
                        group.tag, entity.id, problem
                    ));
                }
                status.detail(&format!(
                    "Processed animation '{}' with {} sprite IDs ({} selected)",
                    group.tag, group.total_sprites, group.selected
                ));
            }
            status.success(&format!("Spritesheet saved to {}", saved.sheet.display()));

            result.success = true;
            result.sheet_path = Some(saved.sheet.display().to_string());
            result.thumbnail_path = saved.thumbnail.map(|p| p.display().to_string());
            result.width = sheet.width();
            result.height = sheet.height();
            result.tiles = sheet.tile_count();
            result.hash = Some(sheet.sheet.hash.clone());
            result.groups = sheet.groups.iter().map(GroupSummary::from).collect();
        }
        Err(err) => {
            status.error(&format!(
                "Failed to process character ID {}: {} [{}]",
                entity.id,
                err,
                err.code()
            ));
            result.error_code = Some(err.code().to_string());
            result.error = Some(err.message());
        }
    }

    result.duration_ms = start.elapsed().as_millis() as u64;
    result
}

/// Print the colored summary block.
fn print_summary(summary: &ExtractionSummary) {
    println!();
    println!("{}", "Extraction Summary".magenta().bold());
    println!(
        "{} {}",
        "Total entities processed:".blue().bold(),
        summary.total_entities
    );
    println!("{} {}", "Successful:".green().bold(), summary.successful);
    println!("{} {}", "Failed:".red().bold(), summary.failed);
    println!(
        "{} {:.2}s",
        "Total runtime:".blue().bold(),
        summary.runtime_seconds
    );

    let failed: Vec<_> = summary.entities.iter().filter(|r| !r.success).collect();
    if !failed.is_empty() {
        println!();
        println!("{}", "Failed entities:".red().bold());
        for result in failed {
            println!(
                "  - character {}: {} {}",
                result.entity_id,
                result.error.as_deref().unwrap_or("unknown error"),
                result
                    .error_code
                    .as_deref()
                    .map(|c| format!("[{}]", c))
                    .unwrap_or_default()
                    .dimmed()
            );
        }
    }

    println!();
    println!("{} {}", "Outputs saved to:".blue().bold(), summary.out_dir);
}

/// Write the summary JSON to `path`.
fn write_report(summary: &ExtractionSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize summary")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write summary: {}", path.display()))?;
    Ok(())
}
