//! Confidence ranking for detection candidates.

use crate::detection::Detection;
use std::cmp::Ordering;

fn prob_cmp_desc(a: &Detection, b: &Detection) -> Ordering {
    b.prob.total_cmp(&a.prob)
}

/// Sorts by descending confidence; equal confidences keep discovery order.
pub fn sort_by_prob_desc(candidates: &mut [Detection]) {
    candidates.sort_by(prob_cmp_desc);
}

/// Parallel variant of [`sort_by_prob_desc`].
///
/// Rayon's `par_sort_by` is stable, so the order matches the sequential sort
/// exactly.
#[cfg(feature = "rayon")]
pub fn par_sort_by_prob_desc(candidates: &mut [Detection]) {
    use rayon::prelude::*;
    candidates.par_sort_by(prob_cmp_desc);
}
