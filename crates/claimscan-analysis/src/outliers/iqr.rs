//! IQR with Tukey fences, upper fence only.
//!
//! Low outliers are never flagged: an unusually cheap service is not a
//! billing anomaly here.

use super::quantile::{quantile_sorted, sorted_copy};
use super::types::IqrBounds;

impl IqrBounds {
    /// Fences over `values` (finite values only). `None` below
    /// `min_samples`.
    pub fn compute(values: &[f64], min_samples: usize, multiplier: f64) -> Option<Self> {
        if values.is_empty() || values.len() < min_samples {
            return None;
        }
        let sorted = sorted_copy(values);
        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn exceeds(&self, value: f64) -> bool {
        value > self.upper
    }
}

/// `(row, value)` pairs strictly above the upper fence, input order kept.
pub fn detect(values: &[(usize, f64)], bounds: &IqrBounds) -> Vec<(usize, f64)> {
    values
        .iter()
        .copied()
        .filter(|&(_, v)| bounds.exceeds(v))
        .collect()
}
