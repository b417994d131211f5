use yolopost::{letterbox_tensor, LetterboxGeometry, PixelBuffer, PixelFormat, YoloPostError};

#[test]
fn landscape_hd_geometry_is_exact() {
    let geometry = LetterboxGeometry::for_image(1280, 720).unwrap();
    assert_eq!(geometry.scale(), 0.5);
    assert_eq!(geometry.resized_width(), 640);
    assert_eq!(geometry.resized_height(), 360);
    assert_eq!(geometry.pad_width(), 0);
    assert_eq!(geometry.pad_height(), 24);
    assert_eq!((geometry.pad_top(), geometry.pad_bottom()), (12, 12));
    assert_eq!(geometry.padded_width(), 640);
    assert_eq!(geometry.padded_height(), 384);
}

#[test]
fn portrait_pads_width_with_floor_half_first() {
    // 480x1000: scale 0.64, width 307.2 -> 307, padded to 320.
    let geometry = LetterboxGeometry::for_image(480, 1000).unwrap();
    assert_eq!(geometry.resized_height(), 640);
    assert_eq!(geometry.resized_width(), 307);
    assert_eq!(geometry.pad_width(), 13);
    assert_eq!(geometry.pad_left(), 6);
    assert_eq!(geometry.pad_right(), 7);
    assert_eq!(geometry.pad_height(), 0);
    assert_eq!(geometry.padded_width() % 32, 0);
}

#[test]
fn shorter_side_is_rounded() {
    // 1000x333: scale 0.64, height 213.12 -> 213.
    let a = LetterboxGeometry::for_image(1000, 333).unwrap();
    assert_eq!(a.resized_height(), 213);
    let b = LetterboxGeometry::for_image(999, 500).unwrap();
    // 500 * 640 / 999 = 320.32 -> 320
    assert_eq!(b.resized_height(), 320);
    assert_eq!(b.pad_height(), 0);
}

#[test]
fn square_and_small_images_upscale_to_target() {
    let geometry = LetterboxGeometry::for_image(64, 64).unwrap();
    assert_eq!(geometry.scale(), 10.0);
    assert_eq!(geometry.padded_width(), 640);
    assert_eq!(geometry.padded_height(), 640);

    let thin = LetterboxGeometry::for_image(4000, 1).unwrap();
    assert_eq!(thin.resized_height(), 1);
    assert_eq!(thin.padded_height(), 32);
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert_eq!(
        LetterboxGeometry::for_image(0, 10).err().unwrap(),
        YoloPostError::InvalidDimensions {
            width: 0,
            height: 10,
        }
    );
    assert!(matches!(
        LetterboxGeometry::compute(10, 10, 640, 0),
        Err(YoloPostError::InvalidInput(_))
    ));
    assert!(matches!(
        LetterboxGeometry::compute(10, 10, 0, 32),
        Err(YoloPostError::InvalidInput(_))
    ));
}

#[test]
fn unpad_inverts_the_letterbox() {
    let geometry = LetterboxGeometry::for_image(1280, 720).unwrap();
    assert_eq!(geometry.unpad_x(320.0), 640.0);
    assert_eq!(geometry.unpad_y(12.0), 0.0);
    assert_eq!(geometry.unpad_y(372.0), 720.0);
}

#[test]
fn preprocessing_pads_with_normalized_gray() {
    // 4x2 white image letterboxed to 8x4 with an 8-pixel multiple: no pad on x,
    // 4 rows resized, padded to 8 rows (2 above, 2 below).
    let data = vec![255u8; 4 * 2 * 4];
    let view = PixelBuffer::from_slice(&data, 4, 2, PixelFormat::Rgba8888).unwrap();
    let geometry = LetterboxGeometry::compute(4, 2, 8, 8).unwrap();
    assert_eq!(geometry.resized_height(), 4);
    assert_eq!((geometry.pad_top(), geometry.pad_bottom()), (2, 2));

    let tensor = letterbox_tensor(view, &geometry).unwrap();
    assert_eq!(tensor.width(), 8);
    assert_eq!(tensor.height(), 8);

    let gray = 114.0 / 255.0;
    for c in 0..3 {
        let plane = tensor.plane(c).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let value = plane[y * 8 + x];
                let expected = if (2..6).contains(&y) { 1.0 } else { gray };
                assert!((value - expected).abs() < 1e-5, "c={c} x={x} y={y} v={value}");
            }
        }
    }
}

#[test]
fn preprocessing_rejects_other_formats() {
    let data = vec![0u8; 4 * 4 * 3];
    let view = PixelBuffer::from_slice(&data, 4, 4, PixelFormat::Rgb888).unwrap();
    let geometry = LetterboxGeometry::for_image(4, 4).unwrap();
    assert_eq!(
        letterbox_tensor(view, &geometry).err().unwrap(),
        YoloPostError::UnsupportedPixelFormat {
            format: PixelFormat::Rgb888,
        }
    );
}
