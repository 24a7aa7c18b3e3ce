//! End-to-end extraction tests.
//!
//! Each test builds a project on disk, runs the extract command's driver
//! and checks the written sheets pixel by pixel.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p exeta-tests --test e2e_extract
//! ```

use std::fs;

use exeta_backend_sheet::SheetLayout;
use exeta_cli::commands::extract::{extract, ExtractRun, ExtractionSummary};
use exeta_cli::config::ExtractConfig;
use exeta_cli::status::Status;
use exeta_tests::fixtures::{entity, frame_group, sprite_color, ProjectFixture};
use pretty_assertions::assert_eq;

fn run(config: &ExtractConfig) -> ExtractionSummary {
    extract(config, &ExtractRun::default(), &Status::new(true, true)).unwrap()
}

/// Pixel at the center of grid cell `(col, row)`.
fn cell_center(col: u32, row: u32, tile: u32) -> (u32, u32) {
    (col * tile + tile / 2, row * tile + tile / 2)
}

fn two_atlas_project() -> ProjectFixture {
    let project = ProjectFixture::new();
    project.add_atlas(90, 120, 32);
    project.add_atlas(121, 140, 32);
    project
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_walking_outfit_sheet() {
    let project = two_atlas_project();
    let ids: Vec<u32> = (100..=115).collect();
    project.write_catalog(vec![entity(
        1,
        32,
        vec![frame_group("FIXED_FRAME_GROUP_OUTFIT_MOVING", 4, 1, 4, &ids)],
    )]);

    let summary = run(&project.config());
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.failed, 0);

    let result = &summary.entities[0];
    assert_eq!((result.width, result.height), (128, 128));
    assert_eq!(result.tiles, 16);
    assert_eq!(result.groups[0].tag, "moving");

    let sheet = project.read_sheet(1);
    assert_eq!(sheet.dimensions(), (128, 128));

    // chunk k along x, element j along y
    for k in 0..4 {
        for j in 0..4 {
            let (x, y) = cell_center(k, j, 32);
            assert_eq!(
                *sheet.get_pixel(x, y),
                sprite_color(100 + 4 * k + j),
                "cell ({}, {})",
                k,
                j
            );
        }
    }

    let thumb = image::open(project.thumbnail_path(1)).unwrap().to_rgba8();
    assert!(thumb.width() <= 160 && thumb.height() <= 160);
    assert_eq!(thumb.dimensions(), (128, 128));
}

#[test]
fn test_idle_walk_ids_placed_as_listed() {
    let project = two_atlas_project();
    let ids: Vec<u32> = (100..=115).collect();
    // 16 ids under a 4x1x1x1 pattern with no animation block
    project.write_catalog(vec![serde_json::json!({
        "id": 1,
        "size": 32,
        "frameGroup": [{
            "label": "idle_walk",
            "spriteInfo": {
                "patternWidth": 4,
                "patternHeight": 1,
                "patternDepth": 1,
                "layers": 1,
                "spriteId": ids
            }
        }]
    })]);

    let summary = run(&project.config());
    assert_eq!(summary.successful, 1);

    let result = &summary.entities[0];
    assert_eq!(result.tiles, 16);
    assert_eq!((result.width, result.height), (128, 128));
    assert_eq!(result.groups[0].tag, "walk");
    assert!(result.groups[0].warning.is_some());

    let sheet = project.read_sheet(1);
    for k in 0..4 {
        for j in 0..4 {
            let (x, y) = cell_center(k, j, 32);
            assert_eq!(*sheet.get_pixel(x, y), sprite_color(100 + 4 * k + j));
        }
    }

    let thumb = image::open(project.thumbnail_path(1)).unwrap().to_rgba8();
    assert!(thumb.width() <= 160 && thumb.height() <= 160);
}

#[test]
fn test_row_major_sheet() {
    let project = two_atlas_project();
    let ids: Vec<u32> = (100..=107).collect();
    project.write_catalog(vec![entity(
        1,
        32,
        vec![frame_group("FIXED_FRAME_GROUP_OUTFIT_MOVING", 4, 1, 2, &ids)],
    )]);

    let mut config = project.config();
    config.layout = SheetLayout::RowMajor;
    run(&config);

    let sheet = project.read_sheet(1);
    assert_eq!(sheet.dimensions(), (128, 64));
    let (x, y) = cell_center(3, 1, 32);
    assert_eq!(*sheet.get_pixel(x, y), sprite_color(107));
}

#[test]
fn test_groups_spanning_atlases_stack() {
    let project = two_atlas_project();
    project.write_catalog(vec![entity(
        5,
        32,
        vec![
            frame_group("FIXED_FRAME_GROUP_OUTFIT_IDLE", 4, 1, 1, &[117, 118, 119, 120]),
            frame_group(
                "FIXED_FRAME_GROUP_OUTFIT_MOVING",
                4,
                1,
                2,
                &[121, 122, 123, 124, 125, 126, 127, 128],
            ),
        ],
    )]);

    let summary = run(&project.config());
    assert_eq!(summary.successful, 1);

    let sheet = project.read_sheet(5);
    // idle 32x128 above moving 64x128
    assert_eq!(sheet.dimensions(), (64, 256));

    let (x, y) = cell_center(0, 3, 32);
    assert_eq!(*sheet.get_pixel(x, y), sprite_color(120));
    let (x, y) = cell_center(1, 4 + 3, 32);
    assert_eq!(*sheet.get_pixel(x, y), sprite_color(128));
    // right of the narrower idle band stays transparent
    let (x, y) = cell_center(1, 0, 32);
    assert_eq!(sheet.get_pixel(x, y).0, [0, 0, 0, 0]);
}

// ============================================================================
// Failure isolation
// ============================================================================

#[test]
fn test_integrity_error_isolated() {
    let project = two_atlas_project();
    project.write_catalog(vec![
        entity(
            1,
            32,
            vec![frame_group("FRAME_GROUP_IDLE", 4, 1, 1, &[90, 91, 92, 93])],
        ),
        // claims 3 frames of 4 directions but lists 11 ids
        entity(
            2,
            32,
            vec![frame_group(
                "FRAME_GROUP_WALKING",
                4,
                1,
                3,
                &(100..111).collect::<Vec<_>>(),
            )],
        ),
        entity(
            3,
            32,
            vec![frame_group("FRAME_GROUP_IDLE", 4, 1, 1, &[130, 131, 132, 133])],
        ),
    ]);

    // the filtered pipeline indexes the pattern, so the mismatch is fatal
    let mut config = project.config();
    config.filter.layers = Some(vec![0]);
    let summary = run(&config);
    assert_eq!(summary.total_entities, 3);
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed, 1);

    let failed = &summary.entities[1];
    assert_eq!(failed.entity_id, 2);
    assert!(!failed.success);
    assert_eq!(failed.error_code.as_deref(), Some("SHEET_005"));
    assert!(failed
        .error
        .as_deref()
        .unwrap()
        .contains("expects 12 sprite ids, found 11"));

    assert!(project.sheet_path(1).is_file());
    assert!(!project.sheet_path(2).exists());
    assert!(project.sheet_path(3).is_file());
}

#[test]
fn test_oversized_tile_size_isolated() {
    let project = two_atlas_project();
    project.write_catalog(vec![
        entity(
            1,
            70_000,
            vec![frame_group("FRAME_GROUP_IDLE", 4, 1, 1, &[90, 91, 92, 93])],
        ),
        entity(
            2,
            32,
            vec![frame_group("FRAME_GROUP_IDLE", 4, 1, 1, &[94, 95, 96, 97])],
        ),
    ]);

    let summary = run(&project.config());
    assert_eq!(summary.entities[0].error_code.as_deref(), Some("SHEET_003"));
    assert!(summary.entities[1].success);
    assert!(!project.sheet_path(1).exists());
    assert!(project.sheet_path(2).is_file());
}

#[test]
fn test_unknown_sprite_isolated() {
    let project = two_atlas_project();
    project.write_catalog(vec![
        entity(
            1,
            32,
            vec![frame_group("FRAME_GROUP_IDLE", 4, 1, 1, &[90, 91, 92, 500])],
        ),
        entity(
            2,
            32,
            vec![frame_group("FRAME_GROUP_IDLE", 4, 1, 1, &[94, 95, 96, 97])],
        ),
    ]);

    let summary = run(&project.config());
    assert_eq!(summary.entities[0].error_code.as_deref(), Some("SHEET_001"));
    assert!(summary.entities[1].success);
    assert!(!project.sheet_path(1).exists());
}

#[test]
fn test_no_partial_output_when_thumbnail_write_fails() {
    let project = two_atlas_project();
    project.write_catalog(vec![entity(
        1,
        32,
        vec![frame_group("FRAME_GROUP_IDLE", 4, 1, 1, &[90, 91, 92, 93])],
    )]);

    // a file where the thumbnail directory belongs
    fs::create_dir_all(&project.out_dir).unwrap();
    fs::write(project.out_dir.join("thumbs"), b"").unwrap();

    let summary = run(&project.config());
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.entities[0].error_code.as_deref(), Some("SHEET_010"));
    assert!(!project.sheet_path(1).exists());
}

// ============================================================================
// Filtered runs
// ============================================================================

#[test]
fn test_filtered_run_writes_no_thumbnails() {
    let project = two_atlas_project();
    // 2 frames x 4 directions x 2 layers
    let ids: Vec<u32> = (100..116).collect();
    project.write_catalog(vec![entity(
        1,
        32,
        vec![frame_group("FIXED_FRAME_GROUP_OUTFIT_MOVING", 4, 2, 2, &ids)],
    )]);

    let mut config = project.config();
    config.filter.layers = Some(vec![0]);
    let summary = run(&config);

    let result = &summary.entities[0];
    assert!(result.success);
    assert_eq!(result.tiles, 8);
    assert_eq!(result.thumbnail_path, None);
    assert!(!project.thumbnail_path(1).exists());

    // layer 0 sprites are the even offsets
    let sheet = project.read_sheet(1);
    assert_eq!(sheet.dimensions(), (64, 128));
    let (x, y) = cell_center(0, 1, 32);
    assert_eq!(*sheet.get_pixel(x, y), sprite_color(102));
    let (x, y) = cell_center(1, 0, 32);
    assert_eq!(*sheet.get_pixel(x, y), sprite_color(108));
}

#[test]
fn test_filter_selecting_nothing_fails_entity() {
    let project = two_atlas_project();
    project.write_catalog(vec![entity(
        1,
        32,
        vec![frame_group("FRAME_GROUP_IDLE", 4, 1, 1, &[90, 91, 92, 93])],
    )]);

    let mut config = project.config();
    config.filter.mount = Some(1);
    let summary = run(&config);

    assert_eq!(summary.entities[0].error_code.as_deref(), Some("SHEET_007"));
    assert!(!project.sheet_path(1).exists());
}
