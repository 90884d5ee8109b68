use std::f64::consts::LN_10;

/// Ceiling for Phred-scaled values; impossible genotypes are reported at it.
pub const MAX_PHRED: f64 = 1e6;

/// Index of the largest value. NaN entries are skipped and ties resolve to
/// the first index; an all-NaN slice yields 0.
pub fn argmax(values: &[f64]) -> usize {
    let mut best_index = 0;
    let mut best_value = f64::NEG_INFINITY;
    let mut seen = false;
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        if !seen || value > best_value {
            best_index = index;
            best_value = value;
            seen = true;
        }
    }
    best_index
}

pub fn min_finite(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .min_by(|a, b| a.total_cmp(b))
}

/// Converts natural-log likelihoods to Phred-scaled values normalized so the
/// most likely entry is 0. Values are capped at [`MAX_PHRED`].
pub fn phred_scale_log_likelihoods(log_likelihoods: &[f64; 3]) -> [f64; 3] {
    let log10_values = log_likelihoods.map(|ll| ll / LN_10);
    let max = log10_values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);
    log10_values.map(|v| {
        let scaled = -10.0 * (v - max);
        if scaled.is_nan() || scaled > MAX_PHRED {
            MAX_PHRED
        } else if scaled == 0.0 {
            // -0.0 prints as "-0"
            0.0
        } else {
            scaled
        }
    })
}
