//! Deterministic PNG writer.
//!
//! Uses fixed compression settings so the same sheet always encodes to the
//! same bytes, which keeps output hashes comparable between runs.

use std::io::Write;

use image::RgbaImage;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Create config optimized for file size (slower, but deterministic).
    pub fn best_compression() -> Self {
        Self {
            compression: Compression::Best,
            filter: FilterType::Paeth,
        }
    }

    /// Create config optimized for speed (faster, but larger files).
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write an RGBA image to any writer.
pub fn write_rgba_to_writer<W: Write>(
    image: &RgbaImage,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode {}x{} image",
            width, height
        )));
    }

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(image.as_raw())?;

    Ok(())
}

/// Compute the BLAKE3 hash of PNG data.
pub fn hash_png(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Write to a Vec<u8> and return the hash.
pub fn write_rgba_to_vec_with_hash(
    image: &RgbaImage,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(image, &mut data, config)?;
    let hash = hash_png(&data);
    Ok((data, hash))
}
