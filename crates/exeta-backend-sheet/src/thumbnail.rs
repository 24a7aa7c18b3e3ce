//! Bounded preview images of composed sheets.

use image::{imageops, RgbaImage};

/// Default edge bound of thumbnails, in pixels.
pub const THUMBNAIL_MAX: u32 = 160;

/// Size of the largest image with the aspect of `width x height` that fits
/// in `max x max`.
///
/// Images that already fit keep their size. The scaled edge is rounded to
/// whichever neighbouring integer best preserves the aspect ratio and is
/// never smaller than one pixel.
pub fn thumbnail_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    let max = max.max(1);
    if width == 0 || height == 0 || (width <= max && height <= max) {
        return (width, height);
    }

    let aspect = f64::from(width) / f64::from(height);
    let bound = f64::from(max);

    if aspect <= 1.0 {
        // taller than wide: height is the bound
        let scaled = bound * aspect;
        let w = round_aspect(scaled, |n| (aspect - n / bound).abs());
        (w, max)
    } else {
        let scaled = bound / aspect;
        let h = round_aspect(scaled, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - bound / n).abs()
            }
        });
        (max, h)
    }
}

fn round_aspect(value: f64, error: impl Fn(f64) -> f64) -> u32 {
    let floor = value.floor();
    let ceil = value.ceil();
    let best = if error(ceil) < error(floor) { ceil } else { floor };
    (best as u32).max(1)
}

/// Downscales `sheet` to fit in `max x max`, preserving aspect.
///
/// Never enlarges: a sheet that already fits is returned as a copy.
pub fn make_thumbnail(sheet: &RgbaImage, max: u32) -> RgbaImage {
    let (width, height) = sheet.dimensions();
    let (w, h) = thumbnail_dimensions(width, height, max);
    if (w, h) == (width, height) {
        return sheet.clone();
    }
    imageops::resize(sheet, w, h, imageops::FilterType::CatmullRom)
}
