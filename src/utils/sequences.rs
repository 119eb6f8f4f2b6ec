use rand::Rng;

/// Evenly spaced values from `start` to `end` inclusive.
///
/// Returns an empty vector when `step` is not positive, either bound is not finite,
/// `start > end`, or the range holds more values than can be indexed.
pub fn interval(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !start.is_finite() || !end.is_finite() || step <= 0.0 || step.is_nan() || start > end {
        return Vec::new();
    }
    let steps = ((end - start) / step + 1e-9).floor();
    if !steps.is_finite() || steps >= usize::MAX as f64 {
        return Vec::new();
    }
    // Index-based to avoid accumulating rounding error.
    let count = steps as usize + 1;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// `n` values drawn uniformly from `[start, end)`.
pub fn uniform<R: Rng>(n: usize, start: f64, end: f64, rng: &mut R) -> Vec<f64> {
    if start >= end {
        return vec![start; n];
    }
    (0..n).map(|_| rng.gen_range(start..end)).collect()
}
