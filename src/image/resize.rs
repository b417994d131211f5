//! Bilinear resampling of RGBA pixels to interleaved RGB floats.

use crate::image::PixelBuffer;

/// Resizes the RGB channels of an RGBA view, dropping alpha.
///
/// Destination pixel centers map to source coordinates with half-pixel
/// alignment, `src = (dst + 0.5) * src_len / dst_len - 0.5`, clamped to the
/// valid range so edge pixels replicate. Output is interleaved `[r, g, b]`
/// with `dst_w * dst_h * 3` values in `[0, 255]`.
pub(crate) fn resize_rgba_to_rgb(src: PixelBuffer<'_>, dst_w: usize, dst_h: usize) -> Vec<f32> {
    let src_w = src.width();
    let src_h = src.height();
    let mut out = Vec::with_capacity(dst_w * dst_h * 3);

    let scale_x = src_w as f32 / dst_w as f32;
    let scale_y = src_h as f32 / dst_h as f32;
    let max_x = (src_w - 1) as f32;
    let max_y = (src_h - 1) as f32;

    let xs: Vec<(usize, usize, f32)> = (0..dst_w)
        .map(|x| sample_coord(x, scale_x, max_x, src_w))
        .collect();

    for y in 0..dst_h {
        let (y0, y1, fy) = sample_coord(y, scale_y, max_y, src_h);
        let (Some(row0), Some(row1)) = (src.row(y0), src.row(y1)) else {
            // Unreachable for a validated view; keep the output length stable.
            out.resize(out.len() + dst_w * 3, 0.0);
            continue;
        };
        for &(x0, x1, fx) in &xs {
            let w00 = (1.0 - fx) * (1.0 - fy);
            let w10 = fx * (1.0 - fy);
            let w01 = (1.0 - fx) * fy;
            let w11 = fx * fy;
            for c in 0..3 {
                let a = row0[x0 * 4 + c] as f32;
                let b = row0[x1 * 4 + c] as f32;
                let d = row1[x0 * 4 + c] as f32;
                let e = row1[x1 * 4 + c] as f32;
                out.push(a * w00 + b * w10 + d * w01 + e * w11);
            }
        }
    }

    out
}

#[inline]
fn sample_coord(dst: usize, scale: f32, max: f32, len: usize) -> (usize, usize, f32) {
    let src = ((dst as f32 + 0.5) * scale - 0.5).clamp(0.0, max);
    let i0 = src.floor() as usize;
    let i1 = (i0 + 1).min(len - 1);
    (i0, i1, src - i0 as f32)
}

#[cfg(test)]
mod tests {
    use super::resize_rgba_to_rgb;
    use crate::image::{PixelBuffer, PixelFormat};

    #[test]
    fn identity_resize_copies_rgb() {
        let data = [10u8, 20, 30, 255, 40, 50, 60, 0];
        let view = PixelBuffer::from_slice(&data, 2, 1, PixelFormat::Rgba8888).unwrap();
        let out = resize_rgba_to_rgb(view, 2, 1);
        assert_eq!(out, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
    }

    #[test]
    fn downscale_averages_neighbours() {
        let data = [0u8, 0, 0, 255, 100, 100, 100, 255];
        let view = PixelBuffer::from_slice(&data, 2, 1, PixelFormat::Rgba8888).unwrap();
        let out = resize_rgba_to_rgb(view, 1, 1);
        for value in out {
            assert!((value - 50.0).abs() < 1e-4);
        }
    }

    #[test]
    fn constant_image_stays_constant() {
        let data = vec![77u8; 5 * 3 * 4];
        let view = PixelBuffer::from_slice(&data, 5, 3, PixelFormat::Rgba8888).unwrap();
        let out = resize_rgba_to_rgb(view, 8, 7);
        assert_eq!(out.len(), 8 * 7 * 3);
        assert!(out.iter().all(|v| (v - 77.0).abs() < 1e-3));
    }
}
