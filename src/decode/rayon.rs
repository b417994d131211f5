//! Rayon-parallel proposal decoding (feature-gated).
//!
//! Work is split over `(anchor, grid row)` pairs. Each task writes its own
//! row buffer and the buffers are concatenated in task order, so the output
//! is identical, element for element, to the sequential decoder.

use crate::anchor::DetectionHead;
use crate::decode::{decode_cell, prepare, DecodeParams};
use crate::detection::Detection;
use crate::tensor::FeatureMap;
use crate::trace::trace_debug;
use crate::util::YoloPostResult;
use rayon::prelude::*;

/// Row-parallel counterpart of [`crate::decode::generate_proposals`].
pub fn generate_proposals_par(
    feat: FeatureMap<'_>,
    head: &DetectionHead,
    params: &DecodeParams,
) -> YoloPostResult<Vec<Detection>> {
    let grid = prepare(&feat, head, params)?;
    let stride = head.stride as f32;
    let rows = feat.num_anchors() * grid.height;

    let row_results: Vec<Vec<Detection>> = (0..rows)
        .into_par_iter()
        .map(|task| {
            let q = task / grid.height;
            let i = task % grid.height;
            let anchor = head.anchors[q];
            let mut row_dets = Vec::new();
            for j in 0..grid.width {
                let Some(row) = feat.cell(q, i * grid.width + j) else {
                    continue;
                };
                if let Some(det) = decode_cell(row, j, i, stride, anchor, params.prob_threshold) {
                    row_dets.push(det);
                }
            }
            row_dets
        })
        .collect();

    let out: Vec<Detection> = row_results.into_iter().flatten().collect();
    trace_debug!("head_proposals", stride = head.stride, count = out.len());
    Ok(out)
}
