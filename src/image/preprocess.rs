//! Letterbox preprocessing: resize, pad and normalize into the engine input.

use crate::image::resize::resize_rgba_to_rgb;
use crate::image::PixelBuffer;
use crate::letterbox::{LetterboxGeometry, PAD_FILL};
use crate::tensor::InputTensor;
use crate::trace::trace_span;
use crate::util::YoloPostResult;

/// Per-channel normalization factor (zero mean).
pub const NORM_SCALE: f32 = 1.0 / 255.0;

/// Builds the normalized, padded planar input tensor for `image`.
///
/// The RGB channels are bilinearly resized to the geometry's resized size
/// and placed at `(pad_left, pad_top)` inside a padded canvas filled with
/// [`PAD_FILL`]. Every value, padding included, is then scaled by
/// [`NORM_SCALE`]. Any format other than `Rgba8888` fails before work starts.
pub fn letterbox_tensor(
    image: PixelBuffer<'_>,
    geometry: &LetterboxGeometry,
) -> YoloPostResult<InputTensor> {
    image.format().ensure_supported()?;

    let _span = trace_span!(
        "letterbox",
        width = geometry.padded_width(),
        height = geometry.padded_height()
    )
    .entered();

    let resized_w = geometry.resized_width();
    let resized_h = geometry.resized_height();
    let padded_w = geometry.padded_width();
    let padded_h = geometry.padded_height();
    let left = geometry.pad_left();
    let top = geometry.pad_top();

    let rgb = resize_rgba_to_rgb(image, resized_w, resized_h);
    let mut tensor = InputTensor::filled(padded_w, padded_h, PAD_FILL)?;
    let plane_len = padded_w * padded_h;
    let data = tensor.as_mut_slice();

    for y in 0..resized_h {
        let src_row = &rgb[y * resized_w * 3..(y + 1) * resized_w * 3];
        let dst_base = (top + y) * padded_w + left;
        for (x, px) in src_row.chunks_exact(3).enumerate() {
            for (c, &value) in px.iter().enumerate() {
                data[c * plane_len + dst_base + x] = value;
            }
        }
    }

    for value in data.iter_mut() {
        *value *= NORM_SCALE;
    }

    Ok(tensor)
}
