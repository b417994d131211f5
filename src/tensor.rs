//! Engine-facing tensors.
//!
//! `InputTensor` is the planar RGB input handed to the engine. `HeadOutput`
//! owns one detection head's raw output and `FeatureMap` is the validated,
//! borrowed view the decoder reads from. A head tensor is laid out as
//! `[anchors, cells, 5 + classes]` in row-major order, each cell row holding
//! `[dx, dy, dw, dh, objectness, class_0 .. class_{C-1}]`.

use crate::util::{YoloPostError, YoloPostResult};

/// Number of leading box and objectness values in each cell row.
pub const BOX_CHANNELS: usize = 5;

/// Planar `3 x height x width` float input tensor.
#[derive(Clone, Debug, PartialEq)]
pub struct InputTensor {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl InputTensor {
    /// Number of colour planes.
    pub const CHANNELS: usize = 3;

    /// Creates a tensor with every value set to `fill`.
    pub fn filled(width: usize, height: usize, fill: f32) -> YoloPostResult<Self> {
        if width == 0 || height == 0 {
            return Err(YoloPostError::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(Self::CHANNELS))
            .ok_or(YoloPostError::InvalidDimensions { width, height })?;
        Ok(Self {
            data: vec![fill; len],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All planes, channel-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns colour plane `c` (0 = red, 1 = green, 2 = blue).
    pub fn plane(&self, c: usize) -> Option<&[f32]> {
        let len = self.width * self.height;
        self.data.get(c * len..(c + 1) * len)
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

/// Raw output of one detection head as produced by an engine.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadOutput {
    stride: usize,
    num_anchors: usize,
    num_cells: usize,
    channels: usize,
    data: Vec<f32>,
}

impl HeadOutput {
    /// Wraps an engine buffer, checking its length against the shape.
    pub fn new(
        stride: usize,
        num_anchors: usize,
        num_cells: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> YoloPostResult<Self> {
        if stride == 0 {
            return Err(YoloPostError::InvalidInput("head stride must be positive"));
        }
        let expected = checked_len(num_anchors, num_cells, channels)?;
        if data.len() != expected {
            return Err(YoloPostError::TensorLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            stride,
            num_anchors,
            num_cells,
            channels,
            data,
        })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn num_anchors(&self) -> usize {
        self.num_anchors
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Borrows the output as a decoder view.
    pub fn view(&self) -> YoloPostResult<FeatureMap<'_>> {
        FeatureMap::new(&self.data, self.num_anchors, self.num_cells, self.channels)
    }
}

/// Borrowed `[anchors, cells, channels]` view over a head tensor.
#[derive(Copy, Clone, Debug)]
pub struct FeatureMap<'a> {
    data: &'a [f32],
    num_anchors: usize,
    num_cells: usize,
    channels: usize,
}

impl<'a> FeatureMap<'a> {
    /// Creates a view; `channels` must leave room for at least one class.
    pub fn new(
        data: &'a [f32],
        num_anchors: usize,
        num_cells: usize,
        channels: usize,
    ) -> YoloPostResult<Self> {
        let expected = checked_len(num_anchors, num_cells, channels)?;
        if data.len() != expected {
            return Err(YoloPostError::TensorLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            num_anchors,
            num_cells,
            channels,
        })
    }

    pub fn num_anchors(&self) -> usize {
        self.num_anchors
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn num_classes(&self) -> usize {
        self.channels - BOX_CHANNELS
    }

    /// Returns the channel row of `cell` for anchor group `anchor`.
    pub fn cell(&self, anchor: usize, cell: usize) -> Option<&'a [f32]> {
        if anchor >= self.num_anchors || cell >= self.num_cells {
            return None;
        }
        let start = (anchor * self.num_cells + cell) * self.channels;
        self.data.get(start..start + self.channels)
    }

    /// Returns all cell rows of one anchor group as a contiguous slice.
    pub fn anchor_slice(&self, anchor: usize) -> Option<&'a [f32]> {
        if anchor >= self.num_anchors {
            return None;
        }
        let len = self.num_cells * self.channels;
        self.data.get(anchor * len..(anchor + 1) * len)
    }
}

fn checked_len(num_anchors: usize, num_cells: usize, channels: usize) -> YoloPostResult<usize> {
    if num_anchors == 0 || num_cells == 0 {
        return Err(YoloPostError::InvalidInput(
            "head tensor needs at least one anchor and one cell",
        ));
    }
    if channels <= BOX_CHANNELS {
        return Err(YoloPostError::InvalidInput(
            "head tensor needs at least one class channel",
        ));
    }
    num_anchors
        .checked_mul(num_cells)
        .and_then(|v| v.checked_mul(channels))
        .ok_or(YoloPostError::InvalidInput("head tensor shape overflows"))
}
