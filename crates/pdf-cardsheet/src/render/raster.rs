//! Card raster preparation

use crate::types::Result;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Pixel count for a length in inches at `dpi`, never below one pixel
pub fn target_pixels(inches: f32, dpi: u32) -> u32 {
    ((inches * dpi as f32).round() as u32).max(1)
}

/// Load an image, flatten transparency onto white and resample it to
/// `width_px` x `height_px`. Returns PNG bytes ready for embedding.
pub(crate) fn prepare_raster(path: &Path, width_px: u32, height_px: u32) -> Result<Vec<u8>> {
    let source = image::open(path)?;
    let flattened = flatten_on_white(&source);
    let resized = imageops::resize(&flattened, width_px, height_px, FilterType::Lanczos3);

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(resized).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn flatten_on_white(source: &DynamicImage) -> RgbImage {
    if !source.color().has_alpha() {
        return source.to_rgb8();
    }

    let rgba = source.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        rgb.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}
