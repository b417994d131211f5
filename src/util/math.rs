//! Numeric helpers shared by the decoder and the letterbox geometry.

/// Logistic sigmoid.
#[inline]
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Rounds `value` up to the next multiple of `multiple` (`multiple > 0`).
#[inline]
pub(crate) fn ceil_to_multiple(value: usize, multiple: usize) -> usize {
    value.div_ceil(multiple) * multiple
}

/// Returns the index and value of the first maximum in `scores`.
///
/// The scan starts from `f32::MIN` with a strict comparison, so NaN entries
/// never win and ties resolve to the lowest index.
#[inline]
pub(crate) fn argmax_first(scores: &[f32]) -> (usize, f32) {
    let mut best_idx = 0usize;
    let mut best = f32::MIN;
    for (idx, &score) in scores.iter().enumerate() {
        if score > best {
            best = score;
            best_idx = idx;
        }
    }
    (best_idx, best)
}

#[cfg(test)]
mod tests {
    use super::{argmax_first, ceil_to_multiple, sigmoid};

    #[test]
    fn sigmoid_is_centered_at_zero() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-7);
        assert!(sigmoid(20.0) > 0.999);
        assert!(sigmoid(-20.0) < 1e-3);
    }

    #[test]
    fn ceil_to_multiple_rounds_up() {
        assert_eq!(ceil_to_multiple(360, 32), 384);
        assert_eq!(ceil_to_multiple(640, 32), 640);
        assert_eq!(ceil_to_multiple(1, 32), 32);
    }

    #[test]
    fn argmax_prefers_first_maximum() {
        assert_eq!(argmax_first(&[0.1, 0.7, 0.7, 0.2]), (1, 0.7));
        assert_eq!(argmax_first(&[f32::NAN, -1.0]), (1, -1.0));
        let (idx, value) = argmax_first(&[f32::NEG_INFINITY; 3]);
        assert_eq!(idx, 0);
        assert_eq!(value, f32::MIN);
    }
}
