//! Inspect command implementation
//!
//! Shows how an entity's frame groups are indexed: pattern dimensions,
//! integrity of the sprite id list and the flat index order for a filter.

use anyhow::{Context, Result};
use colored::Colorize;
use exeta_backend_sheet::{compute_indices, selected_sprite_ids};
use exeta_spec::{Catalog, EntityRecord, FrameGroup, SelectionFilter, SpritePattern};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

/// Indexing details of one frame group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInspection {
    pub index: usize,
    pub label: String,
    pub tag: String,
    pub frames: u32,
    pub depth: u32,
    pub height: u32,
    pub width: u32,
    pub layers: u32,
    pub sprite_count: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub indices: Vec<usize>,
    pub sprite_ids: Vec<u32>,
}

/// Indexing details of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectOutput {
    pub entity_id: u32,
    pub size: u32,
    pub groups: Vec<GroupInspection>,
}

impl InspectOutput {
    /// True when every group passed the integrity check.
    pub fn is_valid(&self) -> bool {
        self.groups.iter().all(|g| g.valid)
    }
}

fn inspect_group(index: usize, group: &FrameGroup, filter: &SelectionFilter) -> GroupInspection {
    let info = &group.sprite_info;
    let mut inspection = GroupInspection {
        index,
        label: group.label.clone(),
        tag: group.animation_tag(),
        frames: info.frame_count(),
        depth: info.pattern_depth,
        height: info.pattern_height,
        width: info.pattern_width,
        layers: info.layers,
        sprite_count: info.sprite_ids.len(),
        valid: false,
        error: None,
        indices: Vec::new(),
        sprite_ids: Vec::new(),
    };

    match SpritePattern::from_info(info) {
        Ok(pattern) => {
            inspection.valid = true;
            inspection.indices = compute_indices(&pattern, filter);
            inspection.sprite_ids = selected_sprite_ids(&pattern, filter);
        }
        Err(err) => inspection.error = Some(err.to_string()),
    }

    inspection
}

/// Inspects every frame group of `entity`.
pub fn inspect(entity: &EntityRecord, filter: &SelectionFilter) -> InspectOutput {
    InspectOutput {
        entity_id: entity.id,
        size: entity.size,
        groups: entity
            .frame_groups
            .iter()
            .enumerate()
            .map(|(i, group)| inspect_group(i, group, filter))
            .collect(),
    }
}

/// Run the inspect command
///
/// # Returns
/// Exit code: 0 if every group is consistent, 1 otherwise
pub fn run(catalog: &Path, id: u32, filter: &SelectionFilter, json: bool) -> Result<ExitCode> {
    let catalog_data = Catalog::from_path(catalog)
        .with_context(|| format!("Failed to load catalog: {}", catalog.display()))?;
    let entity = catalog_data
        .find(id)
        .with_context(|| format!("Character ID {} is not in {}", id, catalog.display()))?;

    let output = inspect(entity, filter);

    if json {
        let text = serde_json::to_string_pretty(&output).context("Failed to serialize result")?;
        println!("{}", text);
    } else {
        print_human(&output);
    }

    Ok(if output.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn print_human(output: &InspectOutput) {
    println!(
        "{} {} (sprite size: {})",
        "Character:".cyan().bold(),
        output.entity_id,
        output.size
    );

    for group in &output.groups {
        println!();
        println!(
            "{} {} '{}' {}",
            "Frame group".cyan().bold(),
            group.index,
            group.tag,
            group.label.dimmed()
        );
        println!(
            "  frames={} mounts={} addons={} directions={} layers={} ({} sprite ids)",
            group.frames, group.depth, group.height, group.width, group.layers, group.sprite_count
        );

        match &group.error {
            Some(error) => println!("  {} {}", "[ERROR]".red(), error),
            None => {
                println!(
                    "  {} {} selected",
                    "[OK]".green(),
                    group.indices.len()
                );
                println!("  {} {:?}", "indices:".dimmed(), group.indices);
                println!("  {} {:?}", "sprites:".dimmed(), group.sprite_ids);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"[
        {"id": 7, "size": 32, "frameGroup": [
            {"fixedFrameGroup": "FIXED_FRAME_GROUP_OUTFIT_IDLE",
             "spriteInfo": {"patternWidth": 4, "patternHeight": 1, "patternDepth": 1,
                            "layers": 2, "spriteId": [10, 11, 12, 13, 14, 15, 16, 17]}},
            {"fixedFrameGroup": "FIXED_FRAME_GROUP_OUTFIT_MOVING",
             "spriteInfo": {"patternWidth": 4, "patternHeight": 1, "patternDepth": 1,
                            "layers": 1, "spriteId": [20, 21, 22]}}
        ]}
    ]"#;

    fn entity() -> EntityRecord {
        Catalog::from_json(CATALOG).unwrap().entities.remove(0)
    }

    #[test]
    fn test_inspect_valid_group() {
        let output = inspect(&entity(), &SelectionFilter::any().with_layers([0]).unwrap());
        let idle = &output.groups[0];

        assert!(idle.valid);
        assert_eq!(idle.tag, "idle");
        assert_eq!(idle.indices, vec![0, 2, 4, 6]);
        assert_eq!(idle.sprite_ids, vec![10, 12, 14, 16]);
    }

    #[test]
    fn test_inspect_reports_integrity_error() {
        let output = inspect(&entity(), &SelectionFilter::any());
        let moving = &output.groups[1];

        assert!(!moving.valid);
        assert!(moving.indices.is_empty());
        assert!(moving.error.as_deref().unwrap().contains("expects 4"));
        assert!(!output.is_valid());
    }

    #[test]
    fn test_run_unknown_entity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let err = run(&path, 99, &SelectionFilter::any(), true).unwrap_err();
        assert!(err.to_string().contains("Character ID 99"));
    }
}
