//! GroupedAnomalyDetector: per-group IQR and Z-score rules over every
//! configured metric.

use rayon::prelude::*;

use claimscan_core::config::{DetectionConfig, MetricSpec};
use claimscan_core::types::value::format_number;
use claimscan_core::{DataError, RecordTable};

use crate::grouping::{EligibilityFilter, Group, GroupPartition};

use super::types::{
    AnomalyMethod, AnomalyRecord, AnomalySet, Evidence, IqrBounds, MetricGroupStats, ZScoreStats,
};
use super::{iqr, zscore};

/// Resolved detector settings.
#[derive(Debug, Clone)]
pub struct DetectorSettings {
    pub group_column: String,
    pub group_label_column: String,
    pub group_display_name: String,
    pub min_group_size: usize,
    pub min_iqr_samples: usize,
    pub iqr_multiplier: f64,
    pub z_threshold: f64,
    pub metrics: Vec<MetricSpec>,
    pub identifying_columns: Vec<String>,
}

impl DetectorSettings {
    pub fn from_config(config: &DetectionConfig) -> Self {
        Self {
            group_column: config.effective_group_column().to_string(),
            group_label_column: config.effective_group_label_column().to_string(),
            group_display_name: config.effective_group_display_name().to_string(),
            min_group_size: config.effective_min_group_size(),
            min_iqr_samples: config.effective_min_iqr_samples(),
            iqr_multiplier: config.effective_iqr_multiplier(),
            z_threshold: config.effective_z_threshold(),
            metrics: config.effective_metrics(),
            identifying_columns: config.effective_identifying_columns(),
        }
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self::from_config(&DetectionConfig::default())
    }
}

/// Output of one detection pass.
#[derive(Debug, Clone)]
pub struct Detection {
    pub iqr: AnomalySet,
    pub zscore: AnomalySet,
    /// One entry per (eligible group, metric), group order then metric order.
    pub stats: Vec<MetricGroupStats>,
    pub groups_total: usize,
    pub groups_eligible: usize,
    pub groups_skipped: usize,
    pub unkeyed_rows: usize,
}

impl Detection {
    pub fn stats_for(&self, group_value: &str, metric: &str) -> Option<&MetricGroupStats> {
        self.stats
            .iter()
            .find(|s| s.group_value == group_value && s.metric == metric)
    }
}

/// Column positions resolved once per pass.
struct Columns {
    group: usize,
    label: Option<usize>,
    metrics: Vec<usize>,
    attributes: Vec<usize>,
}

#[derive(Default)]
struct GroupOutcome {
    iqr: Vec<AnomalyRecord>,
    zscore: Vec<AnomalyRecord>,
    stats: Vec<MetricGroupStats>,
}

/// Flags records whose metric is extreme relative to their own service
/// code group. The table is only read; all results are fresh allocations.
pub struct GroupedAnomalyDetector {
    settings: DetectorSettings,
}

impl GroupedAnomalyDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        Self { settings }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::new(DetectorSettings::from_config(config))
    }

    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    /// Run both rules over every eligible group.
    ///
    /// Fails when the table is empty or the group key or a metric column
    /// is absent. A missing label column only leaves labels empty.
    pub fn detect(&self, table: &RecordTable) -> Result<Detection, DataError> {
        let s = &self.settings;
        let partition = GroupPartition::build(table, &s.group_column)?;
        let columns = self.resolve_columns(table)?;

        let eligible = EligibilityFilter::new(s.min_group_size).apply(&partition);
        tracing::debug!(
            groups = partition.len(),
            eligible = eligible.groups.len(),
            "partitioned table"
        );

        let outcomes: Vec<GroupOutcome> = eligible
            .groups
            .par_iter()
            .map(|group| self.detect_group(table, &columns, group))
            .collect();

        let attribute_columns: Vec<String> = columns
            .attributes
            .iter()
            .map(|&c| table.columns()[c].clone())
            .collect();
        let mut iqr_set = AnomalySet::new(AnomalyMethod::Iqr, attribute_columns.clone());
        let mut z_set = AnomalySet::new(AnomalyMethod::ZScore, attribute_columns);
        let mut stats = Vec::new();
        for outcome in outcomes {
            iqr_set.records.extend(outcome.iqr);
            z_set.records.extend(outcome.zscore);
            stats.extend(outcome.stats);
        }

        Ok(Detection {
            iqr: iqr_set,
            zscore: z_set,
            stats,
            groups_total: partition.len(),
            groups_eligible: eligible.groups.len(),
            groups_skipped: eligible.skipped,
            unkeyed_rows: partition.unkeyed_rows,
        })
    }

    fn resolve_columns(&self, table: &RecordTable) -> Result<Columns, DataError> {
        let s = &self.settings;
        let group = table.require_column(&s.group_column)?;
        let metrics = s
            .metrics
            .iter()
            .map(|m| table.require_column(&m.column))
            .collect::<Result<Vec<_>, _>>()?;
        let attributes = s
            .identifying_columns
            .iter()
            .filter_map(|c| table.column_index(c))
            .collect();
        Ok(Columns {
            group,
            label: table.column_index(&s.group_label_column),
            metrics,
            attributes,
        })
    }

    fn detect_group(&self, table: &RecordTable, columns: &Columns, group: &Group) -> GroupOutcome {
        let s = &self.settings;
        let mut outcome = GroupOutcome::default();

        for (metric, &col) in s.metrics.iter().zip(&columns.metrics) {
            // Text cells are coerced here; anything non-numeric or
            // non-finite is missing for this metric.
            let values: Vec<(usize, f64)> = group
                .rows
                .iter()
                .filter_map(|&row| {
                    let v = table.value(row, col).coerce_numeric().finite()?;
                    Some((row, v))
                })
                .collect();
            let sample: Vec<f64> = values.iter().map(|&(_, v)| v).collect();

            let bounds = IqrBounds::compute(&sample, s.min_iqr_samples, s.iqr_multiplier);
            let mut iqr_hits = bounds
                .as_ref()
                .map(|b| iqr::detect(&values, b))
                .unwrap_or_default();
            sort_descending(&mut iqr_hits, |&(_, v)| v);

            let z_stats = ZScoreStats::compute(&sample, s.min_group_size);
            let mut z_hits = z_stats
                .as_ref()
                .map(|z| zscore::detect(&values, z, s.z_threshold))
                .unwrap_or_default();
            sort_descending(&mut z_hits, |&(_, v, _)| v);

            outcome.stats.push(MetricGroupStats {
                group_value: group.key.clone(),
                metric: metric.column.clone(),
                group_size: group.size(),
                n_values: sample.len(),
                iqr: bounds,
                zscore: z_stats,
                iqr_flagged: iqr_hits.len(),
                zscore_flagged: z_hits.len(),
            });

            if let Some(b) = bounds {
                let reason = format!(
                    "{} > {}-specific IQR upper bound",
                    metric.column, s.group_display_name
                );
                for (row, value) in iqr_hits {
                    outcome.iqr.push(self.record(
                        table,
                        columns,
                        group,
                        metric,
                        row,
                        value,
                        AnomalyMethod::Iqr,
                        Evidence::Iqr(b),
                        reason.clone(),
                    ));
                }
            }

            let reason = format!(
                "{} Z-score > {} within {} group",
                metric.column,
                format_number(s.z_threshold),
                s.group_display_name
            );
            for (row, value, score) in z_hits {
                outcome.zscore.push(self.record(
                    table,
                    columns,
                    group,
                    metric,
                    row,
                    value,
                    AnomalyMethod::ZScore,
                    Evidence::ZScore {
                        score,
                        threshold: s.z_threshold,
                    },
                    reason.clone(),
                ));
            }
        }
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        &self,
        table: &RecordTable,
        columns: &Columns,
        group: &Group,
        metric: &MetricSpec,
        row: usize,
        value: f64,
        method: AnomalyMethod,
        evidence: Evidence,
        reason: String,
    ) -> AnomalyRecord {
        let group_label = columns
            .label
            .map(|c| table.value(row, c))
            .filter(|v| !v.is_missing())
            .map(|v| v.to_cell_string());
        AnomalyRecord {
            row,
            attributes: columns
                .attributes
                .iter()
                .map(|&c| table.value(row, c).clone())
                .collect(),
            method,
            metric: metric.column.clone(),
            metric_label: metric.label.clone(),
            metric_value: value,
            group_key: self.settings.group_column.clone(),
            group_value: group.key.clone(),
            group_label,
            group_size: group.size(),
            evidence,
            reason,
        }
    }
}

/// Stable descending sort; ties keep input row order.
fn sort_descending<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimscan_core::Value;

    fn table(rows: &[(&str, f64)]) -> RecordTable {
        RecordTable::from_rows(
            vec!["hcpcs_cd".into(), "hcpcs_desc".into(), "avg_mdcr_pymt_amt".into()],
            rows.iter()
                .map(|&(code, pay)| vec![Value::from(code), Value::from("desc"), Value::from(pay)])
                .collect(),
        )
        .unwrap()
    }

    fn payment_only() -> GroupedAnomalyDetector {
        let mut settings = DetectorSettings::default();
        settings.metrics = vec![MetricSpec::new("avg_mdcr_pymt_amt", "Payment Amount")];
        GroupedAnomalyDetector::new(settings)
    }

    #[test]
    fn ties_keep_row_order_within_a_pair() {
        let mut rows = vec![("A", 10.0); 36];
        rows.extend([("A", 500.0), ("A", 900.0), ("A", 500.0), ("A", 900.0)]);
        let d = payment_only().detect(&table(&rows)).unwrap();
        let order: Vec<usize> = d.iqr.iter().map(|r| r.row).collect();
        assert_eq!(order, vec![37, 39, 36, 38]);
    }

    #[test]
    fn groups_follow_first_seen_order() {
        let mut rows = Vec::new();
        for i in 0..40 {
            rows.push(("Z", if i == 5 { 1000.0 } else { 100.0 }));
            rows.push(("A", if i == 7 { 2000.0 } else { 100.0 }));
        }
        let d = payment_only().detect(&table(&rows)).unwrap();
        let groups: Vec<&str> = d.iqr.iter().map(|r| r.group_value.as_str()).collect();
        assert_eq!(groups, vec!["Z", "A"]);
        assert_eq!(d.groups_eligible, 2);
    }

    #[test]
    fn missing_metric_column_is_fatal() {
        let t = RecordTable::from_rows(
            vec!["hcpcs_cd".into()],
            vec![vec![Value::from("A")]],
        )
        .unwrap();
        let err = payment_only().detect(&t).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { ref column } if column == "avg_mdcr_pymt_amt"));
    }
}
