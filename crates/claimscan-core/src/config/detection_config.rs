//! Grouped anomaly detection configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GROUP_COLUMN, DEFAULT_GROUP_DISPLAY_NAME, DEFAULT_GROUP_LABEL_COLUMN,
    DEFAULT_IQR_MULTIPLIER, DEFAULT_MIN_GROUP_SIZE, DEFAULT_MIN_IQR_SAMPLES,
    DEFAULT_Z_THRESHOLD, PAYMENT_COLUMN, SUBMITTED_TO_PAYMENT_RATIO_COLUMN,
};

/// A metric evaluated for anomalies: the column and its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub column: String,
    pub label: String,
}

impl MetricSpec {
    pub fn new(column: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            label: label.into(),
        }
    }
}

/// Configuration for the grouped detector.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Grouping key column. Default: `hcpcs_cd`.
    pub group_column: Option<String>,
    /// Group label column used in rollups. Default: `hcpcs_desc`.
    pub group_label_column: Option<String>,
    /// Grouping key name used in reason strings. Default: `HCPCS`.
    pub group_display_name: Option<String>,
    /// Minimum group size for eligibility. Default: 30.
    pub min_group_size: Option<usize>,
    /// Minimum non-missing values for IQR bounds. Default: 8.
    pub min_iqr_samples: Option<usize>,
    /// Tukey fence multiplier. Default: 1.5.
    pub iqr_multiplier: Option<f64>,
    /// Z-score threshold. Default: 3.5.
    pub z_threshold: Option<f64>,
    /// Metrics to evaluate, in evaluation order.
    #[serde(default)]
    pub metrics: Vec<MetricSpec>,
    /// Pass-through columns copied onto each anomaly record when present.
    #[serde(default)]
    pub identifying_columns: Vec<String>,
}

impl DetectionConfig {
    pub fn effective_group_column(&self) -> &str {
        self.group_column.as_deref().unwrap_or(DEFAULT_GROUP_COLUMN)
    }

    pub fn effective_group_label_column(&self) -> &str {
        self.group_label_column
            .as_deref()
            .unwrap_or(DEFAULT_GROUP_LABEL_COLUMN)
    }

    pub fn effective_group_display_name(&self) -> &str {
        self.group_display_name
            .as_deref()
            .unwrap_or(DEFAULT_GROUP_DISPLAY_NAME)
    }

    pub fn effective_min_group_size(&self) -> usize {
        self.min_group_size.unwrap_or(DEFAULT_MIN_GROUP_SIZE)
    }

    pub fn effective_min_iqr_samples(&self) -> usize {
        self.min_iqr_samples.unwrap_or(DEFAULT_MIN_IQR_SAMPLES)
    }

    pub fn effective_iqr_multiplier(&self) -> f64 {
        self.iqr_multiplier.unwrap_or(DEFAULT_IQR_MULTIPLIER)
    }

    pub fn effective_z_threshold(&self) -> f64 {
        self.z_threshold.unwrap_or(DEFAULT_Z_THRESHOLD)
    }

    /// Payment amount, then submitted/payment ratio, unless overridden.
    pub fn effective_metrics(&self) -> Vec<MetricSpec> {
        if !self.metrics.is_empty() {
            return self.metrics.clone();
        }
        vec![
            MetricSpec::new(PAYMENT_COLUMN, "Payment Amount"),
            MetricSpec::new(SUBMITTED_TO_PAYMENT_RATIO_COLUMN, "Submitted/Payment Ratio"),
        ]
    }

    pub fn effective_identifying_columns(&self) -> Vec<String> {
        if !self.identifying_columns.is_empty() {
            return self.identifying_columns.clone();
        }
        DEFAULT_IDENTIFYING_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect()
    }
}

/// Provider, service, and billing columns carried onto anomaly records.
pub const DEFAULT_IDENTIFYING_COLUMNS: &[&str] = &[
    "hcpcs_cd",
    "hcpcs_desc",
    "rndrng_npi",
    "rndrng_prvdr_last_org_name",
    "rndrng_prvdr_first_name",
    "rndrng_prvdr_type",
    "place_of_srvc",
    "place_of_srvc_label",
    "rndrng_prvdr_state_abrvtn",
    "rndrng_prvdr_city",
    "tot_benes",
    "tot_srvcs",
    "avg_sbmtd_chrg_amt",
    "avg_mdcr_alowd_amt",
    "avg_mdcr_pymt_amt",
    "avg_mdcr_stdzd_amt",
    "submitted_to_payment_ratio",
    "payment_to_allowed_ratio",
];
