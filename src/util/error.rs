//! Error types for yolopost.

use crate::image::PixelFormat;
use thiserror::Error;

/// Result alias for yolopost operations.
pub type YoloPostResult<T> = std::result::Result<T, YoloPostError>;

/// Errors that can occur while preparing inputs or post-processing outputs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum YoloPostError {
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride (in bytes) is shorter than one row of pixels.
    #[error("invalid stride: {stride} bytes for a {row_bytes}-byte row")]
    InvalidStride { row_bytes: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Tensor buffer length does not match its declared shape.
    #[error("tensor length mismatch: expected {expected}, got {got}")]
    TensorLength { expected: usize, got: usize },
    /// The cell count of a head does not tile the padded input grid.
    #[error("stride {stride}: {cells} cells do not form a {grid_w}x{grid_h} grid")]
    GridMismatch {
        stride: usize,
        cells: usize,
        grid_w: usize,
        grid_h: usize,
    },
    /// A head tensor carries more anchor groups than the head defines.
    #[error("stride {stride}: tensor has {got} anchor groups, head defines {expected}")]
    AnchorMismatch {
        stride: usize,
        expected: usize,
        got: usize,
    },
    /// No engine output was supplied for a detection head.
    #[error("no output for stride {stride}")]
    MissingHead { stride: usize },
    /// The pixel buffer is not in the supported channel layout.
    #[error("unsupported pixel format: {format:?}")]
    UnsupportedPixelFormat { format: PixelFormat },
    /// Accelerated execution was requested but no accelerator is present.
    #[error("accelerated execution requested but no accelerator is available")]
    AcceleratorUnavailable,
    /// The inference engine could not produce an output tensor.
    #[error("engine failed to produce output `{output}`: {reason}")]
    TensorAllocationFailure { output: String, reason: String },
    /// A request arrived before the engine finished loading its model.
    #[error("model is not initialized")]
    ModelNotInitialized,
    /// Image decoding or file access failed.
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
