use num::Float;

/// Normalized exponential, in place.
///
/// The max score is subtracted first, so large scores do not overflow.
/// The result is non-negative and sums to 1 (within float tolerance).
/// An empty slice is left untouched.
///
/// # Arguments
/// * `scores` - raw linear scores, overwritten with probabilities
pub fn softmax_in_place<N>(scores: &mut [N])
where
    N: Float,
{
    if scores.is_empty() {
        return;
    }
    let max = scores
        .iter()
        .copied()
        .fold(N::neg_infinity(), |acc, s| if s > acc { s } else { acc });

    let mut sum = N::zero();
    for s in scores.iter_mut() {
        *s = (*s - max).exp();
        sum = sum + *s;
    }
    for s in scores.iter_mut() {
        *s = *s / sum;
    }
}

/// Index of the largest value; the first one wins on ties.
pub fn argmax<N>(values: &[N]) -> Option<usize>
where
    N: Float,
{
    let mut best: Option<(usize, N)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_sums_to_one() {
        let mut s = vec![1.0f64, 2.0, 3.0];
        softmax_in_place(&mut s);
        let total: f64 = s.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(s[2] > s[1] && s[1] > s[0]);
    }

    #[test]
    fn softmax_of_equal_scores_is_uniform() {
        let mut s = vec![0.0f32; 4];
        softmax_in_place(&mut s);
        for p in s {
            assert!((p - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn softmax_handles_large_scores() {
        let mut s = vec![1000.0f64, 1000.0];
        softmax_in_place(&mut s);
        assert!((s[0] - 0.5).abs() < 1e-12);
        assert!(s.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn argmax_prefers_first_on_tie() {
        assert_eq!(argmax(&[0.5f64, 0.5]), Some(0));
        assert_eq!(argmax(&[0.1f64, 0.7, 0.2]), Some(1));
        assert_eq!(argmax::<f64>(&[]), None);
    }
}
