//! Letterbox geometry for aspect-preserving resize with aligned padding.
//!
//! The longer image side is scaled to exactly `target_size` and the shorter
//! side follows with the same ratio. Each resized axis is then padded up to
//! the next multiple of `multiple`, with the padding split into a floor half
//! before the image and the remainder after it.

use crate::util::math::ceil_to_multiple;
use crate::util::{YoloPostError, YoloPostResult};

/// Side length the longer image axis is scaled to.
pub const TARGET_SIZE: usize = 640;
/// Padded input dimensions are rounded up to this multiple.
pub const SIZE_MULTIPLE: usize = 32;
/// Constant fill value for padded pixels, before normalization.
pub const PAD_FILL: f32 = 114.0;

/// Resize and padding parameters derived from one source image size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterboxGeometry {
    scale: f32,
    resized_w: usize,
    resized_h: usize,
    pad_w: usize,
    pad_h: usize,
}

impl LetterboxGeometry {
    /// Computes the geometry with the default target size and multiple.
    pub fn for_image(width: usize, height: usize) -> YoloPostResult<Self> {
        Self::compute(width, height, TARGET_SIZE, SIZE_MULTIPLE)
    }

    /// Computes the geometry for a `width x height` image.
    ///
    /// The shorter side is `round(dim * scale)`, never less than one pixel.
    pub fn compute(
        width: usize,
        height: usize,
        target_size: usize,
        multiple: usize,
    ) -> YoloPostResult<Self> {
        if width == 0 || height == 0 {
            return Err(YoloPostError::InvalidDimensions { width, height });
        }
        if target_size == 0 {
            return Err(YoloPostError::InvalidInput("target_size must be positive"));
        }
        if multiple == 0 {
            return Err(YoloPostError::InvalidInput("size multiple must be positive"));
        }

        let scale = target_size as f32 / width.max(height) as f32;
        let scaled = |dim: usize| ((dim as f32 * scale).round() as usize).max(1);
        let (resized_w, resized_h) = if width > height {
            (target_size, scaled(height))
        } else {
            (scaled(width), target_size)
        };

        let pad_w = ceil_to_multiple(resized_w, multiple) - resized_w;
        let pad_h = ceil_to_multiple(resized_h, multiple) - resized_h;

        Ok(Self {
            scale,
            resized_w,
            resized_h,
            pad_w,
            pad_h,
        })
    }

    /// Ratio between resized and original dimensions.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn resized_width(&self) -> usize {
        self.resized_w
    }

    pub fn resized_height(&self) -> usize {
        self.resized_h
    }

    /// Total horizontal padding.
    pub fn pad_width(&self) -> usize {
        self.pad_w
    }

    /// Total vertical padding.
    pub fn pad_height(&self) -> usize {
        self.pad_h
    }

    pub fn pad_left(&self) -> usize {
        self.pad_w / 2
    }

    pub fn pad_right(&self) -> usize {
        self.pad_w - self.pad_w / 2
    }

    pub fn pad_top(&self) -> usize {
        self.pad_h / 2
    }

    pub fn pad_bottom(&self) -> usize {
        self.pad_h - self.pad_h / 2
    }

    /// Width of the padded network input.
    pub fn padded_width(&self) -> usize {
        self.resized_w + self.pad_w
    }

    /// Height of the padded network input.
    pub fn padded_height(&self) -> usize {
        self.resized_h + self.pad_h
    }

    /// Maps a padded-space x coordinate back to original image space.
    #[inline]
    pub fn unpad_x(&self, x: f32) -> f32 {
        (x - self.pad_left() as f32) / self.scale
    }

    /// Maps a padded-space y coordinate back to original image space.
    #[inline]
    pub fn unpad_y(&self, y: f32) -> f32 {
        (y - self.pad_top() as f32) / self.scale
    }
}
