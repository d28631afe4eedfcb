//! Plain-text analysis summary.

use std::fmt::Write as _;

use serde::Serialize;

use super::global_stats::MetricSummary;

/// Everything the analysis summary report shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub rows_total: usize,
    pub columns_total: usize,
    pub group_column: String,
    pub group_display_name: String,
    pub min_group_size: usize,
    pub groups_total: usize,
    pub groups_eligible: usize,
    pub groups_skipped: usize,
    pub metrics: Vec<MetricSummary>,
    pub iqr_anomalies: usize,
    pub zscore_anomalies: usize,
}

impl AnalysisSummary {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(
            out,
            "=== Analysis Summary ({} Group-wise) ===",
            self.group_display_name
        )?;
        writeln!(out, "rows_total: {}", self.rows_total)?;
        writeln!(out, "columns_total: {}", self.columns_total)?;
        writeln!(out, "group_column: {}", self.group_column)?;
        writeln!(out, "min_group_size_used: {}", self.min_group_size)?;
        writeln!(out, "groups_total: {}", self.groups_total)?;
        writeln!(out, "groups_eligible: {}", self.groups_eligible)?;
        writeln!(out, "groups_skipped: {}", self.groups_skipped)?;
        writeln!(out)?;

        for metric in &self.metrics {
            writeln!(out, "=== {} ({}) Global Stats ===", metric.label, metric.column)?;
            if let Some(s) = &metric.stats {
                writeln!(out, "mean: {:.6}", s.mean)?;
                writeln!(out, "median: {:.6}", s.median)?;
                writeln!(out, "min: {:.6}", s.min)?;
                writeln!(out, "max: {:.6}", s.max)?;
                writeln!(out, "std: {:.6}", s.std_dev)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "=== Anomalies Counts ===")?;
        writeln!(out, "IQR anomalies total: {}", self.iqr_anomalies)?;
        writeln!(out, "Z-score anomalies total: {}", self.zscore_anomalies)?;
        writeln!(out)?;

        let g = &self.group_display_name;
        writeln!(out, "=== Notes for Reporting ===")?;
        writeln!(
            out,
            "- IQR anomalies are defined per {} code (service) to avoid mixing different services.",
            g
        )?;
        writeln!(
            out,
            "- Only values above the upper fence or threshold are flagged; low values never are."
        )?;
        writeln!(
            out,
            "- Ratio anomalies highlight cases where submitted charges are disproportionately higher than Medicare payments."
        )?;
        writeln!(
            out,
            "- Use place_of_srvc_label + provider_type to interpret why costs differ (office vs facility, specialty differences)."
        )?;
        writeln!(out)
    }
}
