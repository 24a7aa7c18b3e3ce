//! Atlas image loading.
//!
//! [`AtlasLoader`] decouples composition from the file system so tests and
//! embedders can serve atlases from memory. [`AtlasCache`] is a read-through
//! cache scoped to a single entity: it is created for one composition and
//! dropped with it, so decoded atlases never outlive the entity that needed
//! them.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::SheetError;

/// Source of decoded atlas images.
pub trait AtlasLoader {
    /// Loads and decodes the atlas at `path` as RGBA.
    fn load(&self, path: &Path) -> Result<RgbaImage, SheetError>;
}

/// Loads atlases from disk with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAtlasLoader;

impl AtlasLoader for FsAtlasLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage, SheetError> {
        let image = image::open(path).map_err(|source| SheetError::AtlasLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(image.to_rgba8())
    }
}

/// Serves atlases from memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryAtlasLoader {
    images: HashMap<PathBuf, RgbaImage>,
}

impl MemoryAtlasLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an atlas image under `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: RgbaImage) {
        self.images.insert(path.into(), image);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_atlas(mut self, path: impl Into<PathBuf>, image: RgbaImage) -> Self {
        self.insert(path, image);
        self
    }
}

impl AtlasLoader for MemoryAtlasLoader {
    fn load(&self, path: &Path) -> Result<RgbaImage, SheetError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| SheetError::AtlasLoad {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(io::Error::new(
                    io::ErrorKind::NotFound,
                    "atlas not registered",
                )),
            })
    }
}

/// Read-through cache of decoded atlases for one composition.
pub struct AtlasCache<'a> {
    loader: &'a dyn AtlasLoader,
    images: HashMap<PathBuf, RgbaImage>,
    loads: usize,
}

impl<'a> AtlasCache<'a> {
    /// Creates an empty cache in front of `loader`.
    pub fn new(loader: &'a dyn AtlasLoader) -> Self {
        Self {
            loader,
            images: HashMap::new(),
            loads: 0,
        }
    }

    /// Returns the decoded atlas at `path`, loading it on first use.
    pub fn get(&mut self, path: &Path) -> Result<&RgbaImage, SheetError> {
        if !self.images.contains_key(path) {
            let image = self.loader.load(path)?;
            self.loads += 1;
            self.images.insert(path.to_path_buf(), image);
        }
        Ok(&self.images[path])
    }

    /// Number of atlases decoded through this cache.
    pub fn loads(&self) -> usize {
        self.loads
    }

    /// Paths of every atlas decoded so far, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.images.keys().cloned().collect();
        paths.sort();
        paths
    }
}
