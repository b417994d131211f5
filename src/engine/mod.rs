//! Inference engine seam.
//!
//! The post-processing core never runs a network itself. An
//! [`InferenceEngine`] holds the loaded, read-only model and hands out one
//! [`Session`] per request; a session accepts the letterboxed input and
//! returns raw head tensors. Graph internals (custom operators, weight
//! storage, accelerator dispatch) stay on the engine side of this boundary.

use crate::anchor::DetectionHead;
use crate::tensor::{HeadOutput, InputTensor};
use crate::util::YoloPostResult;

pub mod replay;

pub use replay::ReplayEngine;

/// Where a request asks the engine to execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    #[default]
    Cpu,
    /// Run on a compute accelerator; never falls back to the CPU.
    Accelerated,
}

/// Process-wide model handle, shared read-only across requests.
pub trait InferenceEngine {
    type Session: Session;

    /// Whether the model finished loading and can serve requests.
    fn is_loaded(&self) -> bool;

    /// Whether accelerated execution is available.
    fn has_accelerator(&self) -> bool;

    /// Opens an execution context for a single request.
    fn session(&self, mode: ExecutionMode) -> YoloPostResult<Self::Session>;
}

/// Per-request execution context; not shared between concurrent requests.
pub trait Session {
    /// Binds the input blob `name`.
    fn set_input(&mut self, name: &str, input: &InputTensor) -> YoloPostResult<()>;

    /// Runs the graph as needed and returns the output of `head`.
    ///
    /// Engines report allocation or execution failures as
    /// `TensorAllocationFailure`.
    fn extract(&mut self, head: &DetectionHead) -> YoloPostResult<HeadOutput>;
}
