//! Linear-interpolation quantiles (`rank = p * (n - 1)`).

/// Quantile `p` in `[0, 1]` of an ascending-sorted, non-empty slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;

    if upper >= sorted.len() {
        sorted[sorted.len() - 1]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }
}

/// Sort a copy of `values` ascending. Callers pass finite values only.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of an unsorted sample; `None` when empty.
pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(quantile_sorted(&sorted_copy(values), p))
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}
