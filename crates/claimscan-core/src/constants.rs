//! Shared constants for the claimscan engine.

// ---- Detection defaults ----

/// Minimum records a group needs before any detection is attempted.
pub const DEFAULT_MIN_GROUP_SIZE: usize = 30;

/// Minimum non-missing values needed to compute IQR bounds.
pub const DEFAULT_MIN_IQR_SAMPLES: usize = 8;

/// Tukey fence multiplier.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// One-sided Z-score threshold.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.5;

/// Grouping key column (service code).
pub const DEFAULT_GROUP_COLUMN: &str = "hcpcs_cd";

/// Column carrying the human-readable label of a group.
pub const DEFAULT_GROUP_LABEL_COLUMN: &str = "hcpcs_desc";

/// Name used for the grouping key in reason strings.
pub const DEFAULT_GROUP_DISPLAY_NAME: &str = "HCPCS";

// ---- Canonical columns ----

pub const PAYMENT_COLUMN: &str = "avg_mdcr_pymt_amt";
pub const SUBMITTED_COLUMN: &str = "avg_sbmtd_chrg_amt";
pub const ALLOWED_COLUMN: &str = "avg_mdcr_alowd_amt";
pub const STANDARDIZED_COLUMN: &str = "avg_mdcr_stdzd_amt";
pub const SUBMITTED_TO_PAYMENT_RATIO_COLUMN: &str = "submitted_to_payment_ratio";
pub const PAYMENT_TO_ALLOWED_RATIO_COLUMN: &str = "payment_to_allowed_ratio";
pub const PLACE_OF_SERVICE_COLUMN: &str = "place_of_srvc";
pub const PLACE_OF_SERVICE_LABEL_COLUMN: &str = "place_of_srvc_label";

// ---- Export defaults ----

/// Entries kept in each top-group rollup.
pub const DEFAULT_ROLLUP_TOP_N: usize = 20;

/// Rollup entries exported to the dashboard per method.
pub const DEFAULT_DASHBOARD_TOP_N: usize = 50;

/// Maximum anomaly records in the dashboard export.
pub const DEFAULT_MAX_EXPORT_RECORDS: usize = 5000;

/// Cost column candidates, highest priority first.
pub const DEFAULT_COST_PRIORITY: &[&str] = &[
    PAYMENT_COLUMN,
    STANDARDIZED_COLUMN,
    ALLOWED_COLUMN,
    SUBMITTED_COLUMN,
    "price_amt",
];

/// Fallback cost column when the table has no numeric column at all.
pub const FALLBACK_COST_COLUMN: &str = "price_amt";

// ---- Artifact names ----

pub const CLEANED_TABLE_FILE: &str = "healthcare_cleaned.csv";
pub const CLEANING_PROFILE_FILE: &str = "01_cleaning_profile.txt";
pub const ANALYSIS_SUMMARY_FILE: &str = "02_analysis_summary.txt";
pub const ANOMALIES_IQR_FILE: &str = "anomalies_iqr.csv";
pub const ANOMALIES_ZSCORE_FILE: &str = "anomalies_zscore.csv";
pub const TOP_IQR_GROUPS_FILE: &str = "top_iqr_groups.csv";
pub const TOP_ZSCORE_GROUPS_FILE: &str = "top_zscore_groups.csv";
pub const SUMMARY_JSON_FILE: &str = "summary.json";
pub const ANOMALIES_JSON_FILE: &str = "anomalies.json";
pub const TOP_GROUPS_JSON_FILE: &str = "top_groups.json";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "claimscan.toml";
