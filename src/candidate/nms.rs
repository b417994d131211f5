//! Greedy IoU non-maximum suppression.

use crate::candidate::rank::sort_by_prob_desc;
use crate::detection::Detection;

/// Returns indices of boxes kept from a list already sorted by confidence.
///
/// A box is kept unless its IoU with some previously kept box exceeds
/// `iou_threshold`. Suppression is class-agnostic.
pub fn nms_sorted(sorted: &[Detection], iou_threshold: f32) -> Vec<usize> {
    let areas: Vec<f32> = sorted.iter().map(Detection::area).collect();
    let mut picked: Vec<usize> = Vec::new();

    'outer: for (i, a) in sorted.iter().enumerate() {
        for &j in &picked {
            let b = &sorted[j];
            let inter = a.intersection_area(b);
            let union = areas[i] + areas[j] - inter;
            if union > 0.0 && inter / union > iou_threshold {
                continue 'outer;
            }
        }
        picked.push(i);
    }

    picked
}

/// Ranks `candidates` by confidence and suppresses overlapping boxes.
///
/// The returned boxes are in descending confidence order.
pub fn nms_boxes(candidates: &mut [Detection], iou_threshold: f32) -> Vec<Detection> {
    sort_by_prob_desc(candidates);
    nms_sorted(candidates, iou_threshold)
        .into_iter()
        .map(|idx| candidates[idx])
        .collect()
}
