//! Image decoding into pixel buffers and PNG export

use std::path::Path;

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use crate::io::error::{Result, SynthError, invalid_input};
use crate::spatial::Pixmap;

/// Load an image file into a flat pixel buffer
///
/// The natural channel count of the file is preserved for 8-bit gray,
/// gray-alpha, RGB, and RGBA images; anything else (16-bit, paletted
/// intermediates) is converted to 8-bit RGBA.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_pixmap(path: &Path) -> Result<Pixmap> {
    let decoded = image::open(path).map_err(|source| SynthError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    match decoded {
        DynamicImage::ImageLuma8(buffer) => {
            let (width, height) = buffer.dimensions();
            Pixmap::from_raw(width as usize, height as usize, 1, buffer.into_raw())
        }
        DynamicImage::ImageLumaA8(buffer) => {
            let (width, height) = buffer.dimensions();
            Pixmap::from_raw(width as usize, height as usize, 2, buffer.into_raw())
        }
        DynamicImage::ImageRgb8(buffer) => {
            let (width, height) = buffer.dimensions();
            Pixmap::from_raw(width as usize, height as usize, 3, buffer.into_raw())
        }
        other => {
            let buffer = other.to_rgba8();
            let (width, height) = buffer.dimensions();
            Pixmap::from_raw(width as usize, height as usize, 4, buffer.into_raw())
        }
    }
}

/// Save a pixel buffer as a PNG file
///
/// # Errors
///
/// Returns an error if the buffer cannot be wrapped as an image of its
/// channel count or the file cannot be written.
pub fn save_pixmap_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let pixels = pixmap.pixels().to_vec();

    let export = |source: image::ImageError| SynthError::ImageExport {
        path: path.to_path_buf(),
        source,
    };

    match pixmap.depth() {
        1 => GrayImage::from_raw(width, height, pixels)
            .ok_or_else(|| invalid_input(&"pixel buffer too short for its dimensions"))?
            .save(path)
            .map_err(export),
        2 => GrayAlphaImage::from_raw(width, height, pixels)
            .ok_or_else(|| invalid_input(&"pixel buffer too short for its dimensions"))?
            .save(path)
            .map_err(export),
        3 => RgbImage::from_raw(width, height, pixels)
            .ok_or_else(|| invalid_input(&"pixel buffer too short for its dimensions"))?
            .save(path)
            .map_err(export),
        4 => RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| invalid_input(&"pixel buffer too short for its dimensions"))?
            .save(path)
            .map_err(export),
        channels => Err(SynthError::UnsupportedChannels { channels }),
    }
}
