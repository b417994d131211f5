#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use yolopost::decode::rayon::generate_proposals_par;
use yolopost::{
    generate_proposals, DecodeParams, DetectConfig, DetectRequest, Detector, HeadOutput,
    PixelBuffer, PixelFormat, ReplayEngine, YOLOV5_HEADS,
};

const CHANNELS: usize = 85;

fn random_head(rng: &mut StdRng, stride: usize, cells: usize) -> HeadOutput {
    let data = (0..3 * cells * CHANNELS)
        .map(|_| rng.random_range(-6.0f32..3.0))
        .collect();
    HeadOutput::new(stride, 3, cells, CHANNELS, data).unwrap()
}

#[test]
fn parallel_decode_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(11);
    let params = DecodeParams {
        padded_w: 640,
        padded_h: 384,
        prob_threshold: 0.25,
    };
    for head in YOLOV5_HEADS.iter() {
        let cells = (640 / head.stride) * (384 / head.stride);
        let output = random_head(&mut rng, head.stride, cells);
        let seq = generate_proposals(output.view().unwrap(), head, &params).unwrap();
        let par = generate_proposals_par(output.view().unwrap(), head, &params).unwrap();
        assert!(!seq.is_empty());
        assert_eq!(seq, par);
    }
}

#[test]
fn parallel_detector_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(5);
    let outputs = vec![
        random_head(&mut rng, 8, 64),
        random_head(&mut rng, 16, 16),
        random_head(&mut rng, 32, 4),
    ];
    let pixels = vec![90u8; 60 * 40 * 4];
    let image = PixelBuffer::from_slice(&pixels, 60, 40, PixelFormat::Rgba8888).unwrap();
    let base = DetectConfig {
        target_size: 64,
        ..DetectConfig::default()
    };

    let seq = Detector::new(ReplayEngine::new(outputs.clone()))
        .with_config(base)
        .detect(&DetectRequest::new(image))
        .unwrap();
    let par = Detector::new(ReplayEngine::new(outputs))
        .with_config(DetectConfig {
            parallel: true,
            ..base
        })
        .detect(&DetectRequest::new(image))
        .unwrap();

    assert_eq!(seq.detections, par.detections);
}
