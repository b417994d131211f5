//! yolopost turns raw YOLOv5 head tensors into labeled image-space boxes.
//!
//! The crate covers the post-processing core of an anchor-based detector:
//! letterbox geometry, proposal decoding per stride, confidence ranking with
//! greedy IoU suppression, and remapping into original image pixels. The
//! network itself sits behind the [`engine::InferenceEngine`] trait. Optional
//! features add parallel decoding (`rayon`), image loading (`image-io`) and
//! structured spans/events (`tracing`).

pub mod anchor;
mod candidate;
pub mod decode;
pub mod detection;
pub mod detector;
pub mod engine;
pub mod image;
pub mod labels;
pub mod letterbox;
pub mod remap;
pub mod tensor;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use anchor::{Anchor, DetectionHead, INPUT_NAME, YOLOV5_HEADS};
pub use decode::{generate_proposals, DecodeParams, GridShape};
pub use detection::{Detection, LabeledDetection};
pub use detector::{DetectConfig, DetectRequest, DetectResult, Detector};
pub use engine::{ExecutionMode, InferenceEngine, ReplayEngine, Session};
pub use crate::image::{letterbox_tensor, OwnedPixels, PixelBuffer, PixelFormat};
pub use labels::{class_name, COCO_CLASSES};
pub use letterbox::{LetterboxGeometry, PAD_FILL, SIZE_MULTIPLE, TARGET_SIZE};
pub use remap::remap_to_original;
pub use tensor::{FeatureMap, HeadOutput, InputTensor};
pub use util::{YoloPostError, YoloPostResult};

pub use candidate::nms::{nms_boxes, nms_sorted};
pub use candidate::rank::sort_by_prob_desc;
