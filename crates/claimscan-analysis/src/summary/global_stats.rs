//! Dataset-wide descriptive statistics.

use serde::Serialize;
use statrs::statistics::Statistics;

use claimscan_core::RecordTable;

use crate::outliers::quantile::median;

/// Descriptive statistics over finite, non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

/// Describe `values`; non-finite entries are dropped first. `None` when
/// nothing is left.
pub fn describe(values: &[f64]) -> Option<DescriptiveStats> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let median = median(&finite)?;
    Some(DescriptiveStats {
        count: finite.len(),
        mean: Statistics::mean(finite.iter()),
        median,
        min: Statistics::min(finite.iter()),
        max: Statistics::max(finite.iter()),
        std_dev: Statistics::population_std_dev(finite.iter()),
    })
}

/// Describe a table column, coercing text cells. Absent column → `None`.
pub fn describe_column(table: &RecordTable, column: &str) -> Option<DescriptiveStats> {
    let col = table.column_index(column)?;
    let values: Vec<f64> = table
        .column_values(col)
        .filter_map(|v| v.coerce_numeric().finite())
        .collect();
    describe(&values)
}

/// Global statistics for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub column: String,
    pub label: String,
    pub stats: Option<DescriptiveStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_std_and_median() {
        let s = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.std_dev - 2.0).abs() < 1e-12);
        assert!((s.median - 4.5).abs() < 1e-12);
        assert_eq!((s.min, s.max), (2.0, 9.0));
    }

    #[test]
    fn non_finite_values_are_dropped() {
        let s = describe(&[1.0, f64::INFINITY, f64::NAN, 3.0]).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.max, 3.0);
    }

    #[test]
    fn empty_is_absent() {
        assert!(describe(&[]).is_none());
        assert!(describe(&[f64::NEG_INFINITY]).is_none());
    }
}
