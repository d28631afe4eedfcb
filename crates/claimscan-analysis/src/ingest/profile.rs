//! Cleaning profile: what ingestion produced, as a plain-text report.

use std::fmt::Write as _;

use serde::Serialize;

use claimscan_core::constants::{
    ALLOWED_COLUMN, PAYMENT_COLUMN, PLACE_OF_SERVICE_COLUMN, STANDARDIZED_COLUMN,
    SUBMITTED_COLUMN,
};
use claimscan_core::RecordTable;

use crate::summary::{describe_column, DescriptiveStats};

/// Columns whose missing counts are reported.
const KEY_COLUMNS: &[&str] = &[
    "hcpcs_cd",
    "hcpcs_desc",
    "rndrng_prvdr_type",
    PLACE_OF_SERVICE_COLUMN,
    "tot_srvcs",
    "tot_benes",
    SUBMITTED_COLUMN,
    ALLOWED_COLUMN,
    PAYMENT_COLUMN,
    STANDARDIZED_COLUMN,
];

const MONEY_COLUMNS: &[&str] = &[
    SUBMITTED_COLUMN,
    ALLOWED_COLUMN,
    PAYMENT_COLUMN,
    STANDARDIZED_COLUMN,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningProfile {
    pub original_columns: usize,
    pub normalized_columns: Vec<String>,
    pub rows_after_cleaning: usize,
    pub duplicates_removed: usize,
    /// (column, missing count) for key columns present after cleaning.
    pub missing_key_values: Vec<(String, usize)>,
    /// (column, stats) for money columns with at least one value.
    pub money_stats: Vec<(String, DescriptiveStats)>,
}

impl CleaningProfile {
    pub fn build(table: &RecordTable, original_columns: usize, duplicates_removed: usize) -> Self {
        let missing_key_values = KEY_COLUMNS
            .iter()
            .filter_map(|&c| table.column_index(c).map(|i| (c.to_string(), table.missing_count(i))))
            .collect();
        let money_stats = MONEY_COLUMNS
            .iter()
            .filter_map(|&c| describe_column(table, c).map(|s| (c.to_string(), s)))
            .collect();
        Self {
            original_columns,
            normalized_columns: table.columns().to_vec(),
            rows_after_cleaning: table.len(),
            duplicates_removed,
            missing_key_values,
            money_stats,
        }
    }

    /// Render the profile. `raw_path` and `clean_path` are echoed verbatim.
    pub fn render_text(&self, raw_path: &str, clean_path: &str) -> String {
        let mut out = String::new();
        let _ = self.write_text(&mut out, raw_path, clean_path);
        out
    }

    fn write_text(&self, out: &mut String, raw_path: &str, clean_path: &str) -> std::fmt::Result {
        writeln!(out, "=== Cleaning Profile ===")?;
        writeln!(out, "raw_path: {}", raw_path)?;
        writeln!(out, "clean_path: {}", clean_path)?;
        writeln!(out)?;
        writeln!(out, "original_columns_count: {}", self.original_columns)?;
        writeln!(out, "normalized_columns_count: {}", self.normalized_columns.len())?;
        writeln!(out, "normalized_columns:")?;
        for c in &self.normalized_columns {
            writeln!(out, "- {}", c)?;
        }
        writeln!(out)?;
        writeln!(out, "rows_after_cleaning: {}", self.rows_after_cleaning)?;
        writeln!(out, "duplicates_removed: {}", self.duplicates_removed)?;
        writeln!(out)?;

        writeln!(out, "missing_values_key_columns:")?;
        for (c, n) in &self.missing_key_values {
            writeln!(out, "- {}: {}", c, n)?;
        }
        writeln!(out)?;

        if !self.money_stats.is_empty() {
            writeln!(out, "money_column_stats:")?;
            for (c, s) in &self.money_stats {
                writeln!(
                    out,
                    "- {}: mean={:.4}, median={:.4}, min={:.4}, max={:.4}",
                    c, s.mean, s.median, s.min, s.max
                )?;
            }
        }
        Ok(())
    }
}
