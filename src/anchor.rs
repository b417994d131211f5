//! Detection heads and their anchor boxes.

/// Reference box size in padded-input pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub width: f32,
    pub height: f32,
}

impl Anchor {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// One output scale of the detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionHead {
    /// Downsampling factor relative to the padded input.
    pub stride: usize,
    /// Anchors in the order of the tensor's anchor groups.
    pub anchors: &'static [Anchor],
    /// Engine output blob carrying this head.
    pub output: &'static str,
}

/// Engine input blob name.
pub const INPUT_NAME: &str = "images";

const STRIDE8_ANCHORS: [Anchor; 3] = [
    Anchor::new(10.0, 13.0),
    Anchor::new(16.0, 30.0),
    Anchor::new(33.0, 23.0),
];

const STRIDE16_ANCHORS: [Anchor; 3] = [
    Anchor::new(30.0, 61.0),
    Anchor::new(62.0, 45.0),
    Anchor::new(59.0, 119.0),
];

const STRIDE32_ANCHORS: [Anchor; 3] = [
    Anchor::new(116.0, 90.0),
    Anchor::new(156.0, 198.0),
    Anchor::new(373.0, 326.0),
];

/// The three YOLOv5 heads, finest stride first.
pub const YOLOV5_HEADS: [DetectionHead; 3] = [
    DetectionHead {
        stride: 8,
        anchors: &STRIDE8_ANCHORS,
        output: "output",
    },
    DetectionHead {
        stride: 16,
        anchors: &STRIDE16_ANCHORS,
        output: "781",
    },
    DetectionHead {
        stride: 32,
        anchors: &STRIDE32_ANCHORS,
        output: "801",
    },
];
