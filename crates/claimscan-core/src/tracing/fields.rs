//! Structured field names shared by spans and events across claimscan.
//!
//! Consistent names keep log queries stable between the ingest, detection,
//! and export stages.

/// Rows in the table being processed.
pub const ROWS: &str = "rows";

/// Distinct grouping-key values seen.
pub const GROUPS_TOTAL: &str = "groups_total";

/// Groups that met the minimum size.
pub const GROUPS_ELIGIBLE: &str = "groups_eligible";

/// Groups skipped by the size guard.
pub const GROUPS_SKIPPED: &str = "groups_skipped";

/// Anomaly records produced by the IQR rule.
pub const IQR_ANOMALIES: &str = "iqr_anomalies";

/// Anomaly records produced by the Z-score rule.
pub const ZSCORE_ANOMALIES: &str = "zscore_anomalies";

/// Stage wall time in milliseconds.
pub const ELAPSED_MS: &str = "elapsed_ms";
