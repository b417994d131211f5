//! Convenience helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{OwnedPixels, PixelBuffer, PixelFormat};
use crate::util::{YoloPostError, YoloPostResult};
use std::path::Path;

/// Creates a borrowed view over an RGBA image buffer.
pub fn view_from_rgba_image(img: &image::RgbaImage) -> YoloPostResult<PixelBuffer<'_>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_slice(img.as_raw(), width, height, PixelFormat::Rgba8888)
}

/// Converts a dynamic image into owned RGBA pixels.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> YoloPostResult<OwnedPixels> {
    let rgba = img.to_rgba8();
    let width = rgba.width() as usize;
    let height = rgba.height() as usize;
    OwnedPixels::new(rgba.into_raw(), width, height, PixelFormat::Rgba8888)
}

/// Loads an image from disk as owned RGBA pixels.
pub fn load_rgba_image<P: AsRef<Path>>(path: P) -> YoloPostResult<OwnedPixels> {
    let img = image::open(path).map_err(|err| YoloPostError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
