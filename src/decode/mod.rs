//! Proposal decoding for anchor-based YOLOv5 heads.
//!
//! Each head tensor is walked per anchor group and grid cell. A cell survives
//! when `sigmoid(objectness) * sigmoid(max raw class score)` clears the
//! probability threshold; its box is then decoded as
//!
//! ```text
//! cx = (sigmoid(dx) * 2 - 0.5 + col) * stride
//! cy = (sigmoid(dy) * 2 - 0.5 + row) * stride
//! bw = (sigmoid(dw) * 2)^2 * anchor_w
//! bh = (sigmoid(dh) * 2)^2 * anchor_h
//! ```
//!
//! and emitted in corner form in padded letterbox pixels. The argmax runs on
//! raw scores and the sigmoid is applied to the winner only; this ordering
//! matches the trained model's calibration and must stay as is.

use crate::anchor::{Anchor, DetectionHead};
use crate::detection::Detection;
use crate::tensor::{FeatureMap, BOX_CHANNELS};
use crate::trace::trace_debug;
use crate::util::math::{argmax_first, sigmoid};
use crate::util::{YoloPostError, YoloPostResult};

#[cfg(feature = "rayon")]
pub mod rayon;

/// Grid layout of one head over the padded input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    pub width: usize,
    pub height: usize,
}

impl GridShape {
    /// Derives the grid for `num_cells` cells at `stride`.
    ///
    /// The longer padded axis fixes its grid dimension directly; the other
    /// dimension is whatever tiles `num_cells`. Anything that does not tile
    /// exactly is rejected.
    pub fn derive(
        padded_w: usize,
        padded_h: usize,
        stride: usize,
        num_cells: usize,
    ) -> YoloPostResult<Self> {
        let mismatch = |grid_w, grid_h| YoloPostError::GridMismatch {
            stride,
            cells: num_cells,
            grid_w,
            grid_h,
        };
        if stride == 0 {
            return Err(YoloPostError::InvalidInput("head stride must be positive"));
        }
        let (width, height) = if padded_w > padded_h {
            let grid_w = padded_w / stride;
            if grid_w == 0 {
                return Err(mismatch(0, 0));
            }
            (grid_w, num_cells / grid_w)
        } else {
            let grid_h = padded_h / stride;
            if grid_h == 0 {
                return Err(mismatch(0, 0));
            }
            (num_cells / grid_h, grid_h)
        };
        if width * height != num_cells {
            return Err(mismatch(width, height));
        }
        Ok(Self { width, height })
    }
}

/// Parameters shared by every head of one request.
#[derive(Clone, Copy, Debug)]
pub struct DecodeParams {
    /// Padded input width in pixels.
    pub padded_w: usize,
    /// Padded input height in pixels.
    pub padded_h: usize,
    /// Cells below this confidence are dropped.
    pub prob_threshold: f32,
}

/// Checks the head/tensor pairing and returns the grid to walk.
pub(crate) fn prepare(
    feat: &FeatureMap<'_>,
    head: &DetectionHead,
    params: &DecodeParams,
) -> YoloPostResult<GridShape> {
    if feat.num_anchors() > head.anchors.len() {
        return Err(YoloPostError::AnchorMismatch {
            stride: head.stride,
            expected: head.anchors.len(),
            got: feat.num_anchors(),
        });
    }
    GridShape::derive(
        params.padded_w,
        params.padded_h,
        head.stride,
        feat.num_cells(),
    )
}

/// Decodes one cell row, returning `None` below the threshold.
#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub(crate) fn decode_cell(
    row: &[f32],
    col: usize,
    grid_row: usize,
    stride: f32,
    anchor: Anchor,
    prob_threshold: f32,
) -> Option<Detection> {
    let (label, class_score) = argmax_first(&row[BOX_CHANNELS..]);
    let confidence = sigmoid(row[4]) * sigmoid(class_score);
    // NaN scores fail this comparison and are dropped.
    if !(confidence >= prob_threshold) {
        return None;
    }

    let dx = sigmoid(row[0]);
    let dy = sigmoid(row[1]);
    let dw = sigmoid(row[2]);
    let dh = sigmoid(row[3]);

    let cx = (dx * 2.0 - 0.5 + col as f32) * stride;
    let cy = (dy * 2.0 - 0.5 + grid_row as f32) * stride;
    let bw = (dw * 2.0).powi(2) * anchor.width;
    let bh = (dh * 2.0).powi(2) * anchor.height;

    let x0 = cx - bw * 0.5;
    let y0 = cy - bh * 0.5;
    let x1 = cx + bw * 0.5;
    let y1 = cy + bh * 0.5;

    Some(Detection {
        x: x0,
        y: y0,
        w: x1 - x0,
        h: y1 - y0,
        label,
        prob: confidence,
    })
}

/// Decodes all candidates of one head in (anchor, row, column) order.
pub fn generate_proposals(
    feat: FeatureMap<'_>,
    head: &DetectionHead,
    params: &DecodeParams,
) -> YoloPostResult<Vec<Detection>> {
    let grid = prepare(&feat, head, params)?;
    let stride = head.stride as f32;
    let mut out = Vec::new();

    for (q, &anchor) in head.anchors.iter().take(feat.num_anchors()).enumerate() {
        for i in 0..grid.height {
            for j in 0..grid.width {
                let Some(row) = feat.cell(q, i * grid.width + j) else {
                    continue;
                };
                if let Some(det) = decode_cell(row, j, i, stride, anchor, params.prob_threshold) {
                    out.push(det);
                }
            }
        }
    }

    trace_debug!("head_proposals", stride = head.stride, count = out.len());
    Ok(out)
}
