//! Mapping of boxes from padded letterbox space back to the source image.

use crate::detection::Detection;
use crate::letterbox::LetterboxGeometry;

/// Remaps `detections` in place to original image pixels.
///
/// Both corners are unpadded with the axis' leading pad, divided by the shared
/// scale, and clipped to `[0, dim - 1]`. Width and height are recomputed from
/// the clipped corners and may become zero for boxes squeezed against an edge.
pub fn remap_to_original(
    detections: &mut [Detection],
    geometry: &LetterboxGeometry,
    width: usize,
    height: usize,
) {
    let max_x = width.saturating_sub(1) as f32;
    let max_y = height.saturating_sub(1) as f32;

    for det in detections.iter_mut() {
        let x0 = geometry.unpad_x(det.x).min(max_x).max(0.0);
        let y0 = geometry.unpad_y(det.y).min(max_y).max(0.0);
        let x1 = geometry.unpad_x(det.x1()).min(max_x).max(0.0);
        let y1 = geometry.unpad_y(det.y1()).min(max_y).max(0.0);

        det.x = x0;
        det.y = y0;
        det.w = x1 - x0;
        det.h = y1 - y0;
    }
}

#[cfg(test)]
mod tests {
    use super::remap_to_original;
    use crate::detection::Detection;
    use crate::letterbox::LetterboxGeometry;

    #[test]
    fn removes_padding_and_scale() {
        // 1280x720 -> 640x360 padded to 640x384, 12 px on top.
        let geometry = LetterboxGeometry::for_image(1280, 720).unwrap();
        let mut dets = [Detection {
            x: 100.0,
            y: 62.0,
            w: 50.0,
            h: 25.0,
            label: 3,
            prob: 0.8,
        }];
        remap_to_original(&mut dets, &geometry, 1280, 720);
        let d = dets[0];
        assert!((d.x - 200.0).abs() < 1e-4);
        assert!((d.y - 100.0).abs() < 1e-4);
        assert!((d.w - 100.0).abs() < 1e-4);
        assert!((d.h - 50.0).abs() < 1e-4);
        assert_eq!(d.label, 3);
    }

    #[test]
    fn clips_to_image_bounds() {
        let geometry = LetterboxGeometry::for_image(640, 640).unwrap();
        let mut dets = [
            Detection {
                x: -20.0,
                y: -5.0,
                w: 700.0,
                h: 30.0,
                label: 0,
                prob: 0.5,
            },
            Detection {
                x: 700.0,
                y: 10.0,
                w: 10.0,
                h: 10.0,
                label: 0,
                prob: 0.5,
            },
        ];
        remap_to_original(&mut dets, &geometry, 640, 640);
        assert_eq!(dets[0].x, 0.0);
        assert_eq!(dets[0].y, 0.0);
        assert_eq!(dets[0].w, 639.0);
        assert_eq!(dets[0].h, 25.0);
        assert_eq!(dets[1].x, 639.0);
        assert_eq!(dets[1].w, 0.0);
    }
}
