//! Detector configuration.

use crate::letterbox::{SIZE_MULTIPLE, TARGET_SIZE};

/// Default confidence floor for kept detections.
pub const PROB_THRESHOLD: f32 = 0.25;
/// Default IoU above which a lower-confidence box is suppressed.
pub const NMS_THRESHOLD: f32 = 0.45;

/// Configuration for post-processing a detection request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectConfig {
    /// Side length the longer image axis is scaled to.
    pub target_size: usize,
    /// Padded input dimensions are rounded up to this multiple.
    pub size_multiple: usize,
    /// Candidates below this confidence are dropped during decoding.
    pub prob_threshold: f32,
    /// IoU threshold for suppression.
    pub nms_threshold: f32,
    /// Decode heads and rank candidates in parallel (requires `rayon`).
    pub parallel: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            target_size: TARGET_SIZE,
            size_multiple: SIZE_MULTIPLE,
            prob_threshold: PROB_THRESHOLD,
            nms_threshold: NMS_THRESHOLD,
            parallel: false,
        }
    }
}
