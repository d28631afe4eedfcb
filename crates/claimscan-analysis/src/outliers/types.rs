//! Core types for grouped anomaly detection.

use std::fmt;

use serde::{Serialize, Serializer};

use claimscan_core::Value;

/// Detection rule that flagged a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnomalyMethod {
    Iqr,
    ZScore,
}

impl AnomalyMethod {
    /// Name written to the `anomaly_method` column.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Iqr => "IQR",
            Self::ZScore => "Z-score",
        }
    }
}

impl fmt::Display for AnomalyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for AnomalyMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Tukey fences over one (group, metric) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Mean and population standard deviation of one (group, metric) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZScoreStats {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl ZScoreStats {
    pub fn score(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

/// The bound or score that justified a flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evidence {
    Iqr(IqrBounds),
    ZScore { score: f64, threshold: f64 },
}

/// One flagged observation with full provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyRecord {
    /// Row index in the analyzed table.
    pub row: usize,
    /// Identifying columns of the source row, aligned with
    /// [`AnomalySet::attribute_columns`].
    pub attributes: Vec<Value>,
    pub method: AnomalyMethod,
    /// Metric column name.
    pub metric: String,
    pub metric_label: String,
    pub metric_value: f64,
    /// Grouping key column name.
    pub group_key: String,
    pub group_value: String,
    /// The source row's group label; `None` when missing.
    pub group_label: Option<String>,
    pub group_size: usize,
    pub evidence: Evidence,
    pub reason: String,
}

impl AnomalyRecord {
    pub fn z_score(&self) -> Option<f64> {
        match self.evidence {
            Evidence::ZScore { score, .. } => Some(score),
            Evidence::Iqr(_) => None,
        }
    }

    pub fn iqr_bounds(&self) -> Option<&IqrBounds> {
        match &self.evidence {
            Evidence::Iqr(b) => Some(b),
            Evidence::ZScore { .. } => None,
        }
    }
}

/// All records flagged by one method, in deterministic order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalySet {
    pub method: AnomalyMethod,
    /// Identifying columns present in the analyzed table.
    pub attribute_columns: Vec<String>,
    pub records: Vec<AnomalyRecord>,
}

impl AnomalySet {
    pub fn new(method: AnomalyMethod, attribute_columns: Vec<String>) -> Self {
        Self {
            method,
            attribute_columns,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnomalyRecord> {
        self.records.iter()
    }

    /// Attribute value of `record` for `column`, missing when the column
    /// was not carried.
    pub fn attribute<'a>(&self, record: &'a AnomalyRecord, column: &str) -> Option<&'a Value> {
        self.attribute_columns
            .iter()
            .position(|c| c == column)
            .map(|i| &record.attributes[i])
    }
}

/// Per (group, metric) statistics, kept whether or not anything was
/// flagged. `None` bounds mean "not computable", distinct from "computed,
/// nothing exceeded".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricGroupStats {
    pub group_value: String,
    pub metric: String,
    pub group_size: usize,
    /// Finite, non-missing metric values in the group.
    pub n_values: usize,
    pub iqr: Option<IqrBounds>,
    pub zscore: Option<ZScoreStats>,
    pub iqr_flagged: usize,
    pub zscore_flagged: usize,
}
