//! AnalysisPipeline: validate → detect → roll up → summarize.

use std::time::Instant;

use claimscan_core::tracing::fields;
use claimscan_core::{ClaimscanConfig, DataError, PipelineError, RecordTable};

use crate::outliers::{Detection, DetectorSettings, GroupedAnomalyDetector};
use crate::rollup::Rollup;
use crate::summary::{describe_column, AnalysisSummary, MetricSummary};

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub detection: Detection,
    pub iqr_rollup: Rollup,
    pub zscore_rollup: Rollup,
    pub summary: AnalysisSummary,
    pub group_column: String,
    pub group_label_column: String,
}

/// Runs the grouped detector over a normalized table and derives the
/// rollups and summary from its output.
pub struct AnalysisPipeline {
    config: ClaimscanConfig,
    detector: GroupedAnomalyDetector,
}

impl AnalysisPipeline {
    pub fn new(config: ClaimscanConfig) -> Self {
        let detector =
            GroupedAnomalyDetector::new(DetectorSettings::from_config(&config.detection));
        Self { config, detector }
    }

    pub fn with_defaults() -> Self {
        Self::new(ClaimscanConfig::default())
    }

    pub fn config(&self) -> &ClaimscanConfig {
        &self.config
    }

    /// Check preconditions without running detection: a non-empty table
    /// carrying the group key, group label, and every metric column.
    pub fn validate(&self, table: &RecordTable) -> Result<(), DataError> {
        let s = self.detector.settings();
        let required = [&s.group_column, &s.group_label_column]
            .into_iter()
            .chain(s.metrics.iter().map(|m| &m.column));
        for column in required {
            table.require_column(column)?;
        }
        if table.is_empty() {
            return Err(DataError::EmptyInput {
                context: "no records to analyze".to_string(),
            });
        }
        Ok(())
    }

    pub fn run(&self, table: &RecordTable) -> Result<AnalysisResult, PipelineError> {
        let started = Instant::now();
        self.validate(table)?;

        let detection = self.detector.detect(table)?;

        let top_n = self.config.export.effective_rollup_top_n();
        let iqr_rollup = Rollup::build(&detection.iqr, top_n);
        let zscore_rollup = Rollup::build(&detection.zscore, top_n);

        let s = self.detector.settings();
        let metrics = s
            .metrics
            .iter()
            .map(|m| MetricSummary {
                column: m.column.clone(),
                label: m.label.clone(),
                stats: describe_column(table, &m.column),
            })
            .collect();

        let summary = AnalysisSummary {
            rows_total: table.len(),
            columns_total: table.column_count(),
            group_column: s.group_column.clone(),
            group_display_name: s.group_display_name.clone(),
            min_group_size: s.min_group_size,
            groups_total: detection.groups_total,
            groups_eligible: detection.groups_eligible,
            groups_skipped: detection.groups_skipped,
            metrics,
            iqr_anomalies: detection.iqr.len(),
            zscore_anomalies: detection.zscore.len(),
        };

        tracing::info!(
            { fields::ROWS } = table.len(),
            { fields::GROUPS_TOTAL } = detection.groups_total,
            { fields::GROUPS_ELIGIBLE } = detection.groups_eligible,
            { fields::GROUPS_SKIPPED } = detection.groups_skipped,
            { fields::IQR_ANOMALIES } = detection.iqr.len(),
            { fields::ZSCORE_ANOMALIES } = detection.zscore.len(),
            { fields::ELAPSED_MS } = started.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(AnalysisResult {
            detection,
            iqr_rollup,
            zscore_rollup,
            summary,
            group_column: s.group_column.clone(),
            group_label_column: s.group_label_column.clone(),
        })
    }
}
