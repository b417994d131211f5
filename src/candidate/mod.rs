//! Candidate ranking and overlap suppression.
//!
//! Candidates from every head are merged, ranked by descending confidence
//! with a stable tie-break on discovery order, then thinned greedily by IoU.

pub(crate) mod nms;
pub(crate) mod rank;
