//! Detector context and the end-to-end detection pipeline.
//!
//! A [`Detector`] is built once around a loaded engine and then serves any
//! number of requests; it holds no per-request state, so it can be shared
//! across threads whenever the engine can. Each request runs
//! letterbox geometry, preprocessing, engine execution, proposal decoding,
//! ranking with suppression, and coordinate remapping, in that order. A
//! request either returns the complete detection list or fails.

mod config;

pub use config::{DetectConfig, NMS_THRESHOLD, PROB_THRESHOLD};

use crate::anchor::{DetectionHead, INPUT_NAME, YOLOV5_HEADS};
use crate::candidate::nms::nms_sorted;
use crate::candidate::rank::sort_by_prob_desc;
use crate::decode::{generate_proposals, DecodeParams};
use crate::detection::{Detection, LabeledDetection};
use crate::engine::{ExecutionMode, InferenceEngine, Session};
use crate::image::{letterbox_tensor, PixelBuffer};
use crate::labels::class_name;
use crate::letterbox::LetterboxGeometry;
use crate::remap::remap_to_original;
use crate::tensor::HeadOutput;
use crate::trace::{trace_event, trace_span};
use crate::util::{YoloPostError, YoloPostResult};
use std::time::Instant;

#[cfg(feature = "rayon")]
use crate::candidate::rank::par_sort_by_prob_desc;
#[cfg(feature = "rayon")]
use crate::decode::rayon::generate_proposals_par;

/// A single detection request.
#[derive(Clone, Copy, Debug)]
pub struct DetectRequest<'a> {
    pub image: PixelBuffer<'a>,
    pub execution: ExecutionMode,
}

impl<'a> DetectRequest<'a> {
    /// Creates a CPU request for `image`.
    pub fn new(image: PixelBuffer<'a>) -> Self {
        Self {
            image,
            execution: ExecutionMode::Cpu,
        }
    }

    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }
}

/// Detections in original image pixels, highest confidence first.
#[derive(Clone, Debug)]
pub struct DetectResult {
    pub detections: Vec<LabeledDetection>,
    /// Geometry the request was letterboxed with.
    pub geometry: LetterboxGeometry,
}

/// Explicit detection context around a loaded engine.
pub struct Detector<E> {
    engine: E,
    cfg: DetectConfig,
    heads: &'static [DetectionHead],
}

impl<E: InferenceEngine> Detector<E> {
    /// Creates a detector with the default configuration and YOLOv5 heads.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            cfg: DetectConfig::default(),
            heads: &YOLOV5_HEADS,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: DetectConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replaces the head table.
    pub fn with_heads(mut self, heads: &'static [DetectionHead]) -> Self {
        self.heads = heads;
        self
    }

    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Runs the full pipeline for one request.
    pub fn detect(&self, request: &DetectRequest<'_>) -> YoloPostResult<DetectResult> {
        let start = Instant::now();

        if !self.engine.is_loaded() {
            return Err(YoloPostError::ModelNotInitialized);
        }
        if request.execution == ExecutionMode::Accelerated && !self.engine.has_accelerator() {
            return Err(YoloPostError::AcceleratorUnavailable);
        }
        let image = request.image;
        image.format().ensure_supported()?;

        let _span = trace_span!("detect", width = image.width(), height = image.height()).entered();

        let geometry = LetterboxGeometry::compute(
            image.width(),
            image.height(),
            self.cfg.target_size,
            self.cfg.size_multiple,
        )?;
        let input = letterbox_tensor(image, &geometry)?;

        let mut session = self.engine.session(request.execution)?;
        session.set_input(INPUT_NAME, &input)?;
        let mut outputs = Vec::with_capacity(self.heads.len());
        for head in self.heads {
            outputs.push(session.extract(head)?);
        }

        let result = self.postprocess(&outputs, &geometry, image.width(), image.height())?;
        trace_event!(
            "detect_done",
            count = result.detections.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1e3
        );
        Ok(result)
    }

    /// Post-processes raw head outputs for an image of `width x height`.
    ///
    /// Outputs are matched to heads by stride; extra outputs are ignored.
    pub fn postprocess(
        &self,
        outputs: &[HeadOutput],
        geometry: &LetterboxGeometry,
        width: usize,
        height: usize,
    ) -> YoloPostResult<DetectResult> {
        if width == 0 || height == 0 {
            return Err(YoloPostError::InvalidDimensions { width, height });
        }
        let params = DecodeParams {
            padded_w: geometry.padded_width(),
            padded_h: geometry.padded_height(),
            prob_threshold: self.cfg.prob_threshold,
        };

        let mut proposals = Vec::new();
        for head in self.heads {
            let output = outputs
                .iter()
                .find(|out| out.stride() == head.stride)
                .ok_or(YoloPostError::MissingHead {
                    stride: head.stride,
                })?;
            proposals.extend(self.decode_head(output, head, &params)?);
        }
        trace_event!("proposals", count = proposals.len());

        self.rank(&mut proposals);
        let mut kept: Vec<Detection> = nms_sorted(&proposals, self.cfg.nms_threshold)
            .into_iter()
            .map(|idx| proposals[idx])
            .collect();
        trace_event!("kept", count = kept.len());

        remap_to_original(&mut kept, geometry, width, height);

        let detections = kept
            .into_iter()
            .map(|detection| {
                class_name(detection.label)
                    .map(|name| LabeledDetection { detection, name })
                    .ok_or(YoloPostError::InvalidInput("label outside the class table"))
            })
            .collect::<YoloPostResult<Vec<_>>>()?;

        Ok(DetectResult {
            detections,
            geometry: *geometry,
        })
    }

    fn decode_head(
        &self,
        output: &HeadOutput,
        head: &DetectionHead,
        params: &DecodeParams,
    ) -> YoloPostResult<Vec<Detection>> {
        let feat = output.view()?;
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                return generate_proposals_par(feat, head, params);
            }
        }
        generate_proposals(feat, head, params)
    }

    fn rank(&self, proposals: &mut [Detection]) {
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                par_sort_by_prob_desc(proposals);
                return;
            }
        }
        sort_by_prob_desc(proposals);
    }
}
