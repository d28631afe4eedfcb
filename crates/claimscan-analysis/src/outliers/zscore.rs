//! One-sided Z-score against the group's population standard deviation.

use statrs::statistics::Statistics;

use super::types::ZScoreStats;

impl ZScoreStats {
    /// Mean and population std (divide by N). `None` below `min_samples`
    /// or when the std is zero or not finite.
    pub fn compute(values: &[f64], min_samples: usize) -> Option<Self> {
        if values.is_empty() || values.len() < min_samples {
            return None;
        }
        let mean = Statistics::mean(values.iter());
        let std_dev = Statistics::population_std_dev(values.iter());
        if !mean.is_finite() || !std_dev.is_finite() || std_dev == 0.0 {
            return None;
        }
        Some(Self {
            n: values.len(),
            mean,
            std_dev,
        })
    }
}

/// `(row, value, score)` for every value scoring strictly above
/// `threshold`, input order kept.
pub fn detect(
    values: &[(usize, f64)],
    stats: &ZScoreStats,
    threshold: f64,
) -> Vec<(usize, f64, f64)> {
    values
        .iter()
        .filter_map(|&(row, v)| {
            let z = stats.score(v);
            (z > threshold).then_some((row, v, z))
        })
        .collect()
}
