//! Exeta End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full extraction flow:
//!
//! - Extraction: catalog + atlas directory -> sheets and thumbnails
//! - Isolation: a broken entity never affects the others
//! - **Determinism**: byte-identical sheets across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p exeta-tests
//! ```
//!
//! Fixtures build throwaway projects in temporary directories. Atlas tiles
//! are filled with a color derived from their global sprite id, so a test
//! can read any pixel of a composed sheet and tell which sprite landed there:
//!
//! ```rust,ignore
//! use exeta_tests::fixtures::{sprite_color, ProjectFixture};
//!
//! let project = ProjectFixture::new();
//! project.add_atlas(90, 120, 32);
//! assert_eq!(*sheet.get_pixel(0, 0), sprite_color(100));
//! ```

pub mod fixtures;
