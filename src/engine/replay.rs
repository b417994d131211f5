//! Engine that serves previously recorded head outputs.
//!
//! Useful for offline post-processing of tensors dumped by another runtime,
//! and for exercising the detector without a network.

use crate::anchor::DetectionHead;
use crate::engine::{ExecutionMode, InferenceEngine, Session};
use crate::tensor::{HeadOutput, InputTensor};
use crate::util::{YoloPostError, YoloPostResult};
use std::sync::Arc;

/// Replays a fixed set of head outputs for every request.
#[derive(Clone, Debug)]
pub struct ReplayEngine {
    outputs: Option<Arc<[HeadOutput]>>,
    accelerator: bool,
}

impl ReplayEngine {
    /// Creates an engine serving `outputs`, matched to heads by stride.
    pub fn new(outputs: Vec<HeadOutput>) -> Self {
        Self {
            outputs: Some(outputs.into()),
            accelerator: false,
        }
    }

    /// Creates an engine whose model never loaded.
    pub fn unloaded() -> Self {
        Self {
            outputs: None,
            accelerator: false,
        }
    }

    /// Declares whether an accelerator is present.
    pub fn with_accelerator(mut self, accelerator: bool) -> Self {
        self.accelerator = accelerator;
        self
    }
}

impl InferenceEngine for ReplayEngine {
    type Session = ReplaySession;

    fn is_loaded(&self) -> bool {
        self.outputs.is_some()
    }

    fn has_accelerator(&self) -> bool {
        self.accelerator
    }

    fn session(&self, mode: ExecutionMode) -> YoloPostResult<ReplaySession> {
        let outputs = self
            .outputs
            .clone()
            .ok_or(YoloPostError::ModelNotInitialized)?;
        if mode == ExecutionMode::Accelerated && !self.accelerator {
            return Err(YoloPostError::AcceleratorUnavailable);
        }
        Ok(ReplaySession {
            outputs,
            input_bound: false,
        })
    }
}

/// Session over a shared recording.
#[derive(Debug)]
pub struct ReplaySession {
    outputs: Arc<[HeadOutput]>,
    input_bound: bool,
}

impl Session for ReplaySession {
    fn set_input(&mut self, _name: &str, _input: &InputTensor) -> YoloPostResult<()> {
        self.input_bound = true;
        Ok(())
    }

    fn extract(&mut self, head: &DetectionHead) -> YoloPostResult<HeadOutput> {
        if !self.input_bound {
            return Err(YoloPostError::TensorAllocationFailure {
                output: head.output.to_string(),
                reason: "no input bound".to_string(),
            });
        }
        self.outputs
            .iter()
            .find(|out| out.stride() == head.stride)
            .cloned()
            .ok_or_else(|| YoloPostError::TensorAllocationFailure {
                output: head.output.to_string(),
                reason: format!("no recorded output for stride {}", head.stride),
            })
    }
}
