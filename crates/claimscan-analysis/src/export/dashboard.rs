//! Dashboard payloads: `summary.json`, `anomalies.json`, `top_groups.json`.

use serde::Serialize;

use claimscan_core::config::ExportConfig;
use claimscan_core::constants::{FALLBACK_COST_COLUMN, PAYMENT_COLUMN};
use claimscan_core::{ExportError, RecordTable, Value};

use crate::outliers::{AnomalyRecord, AnomalySet, IqrBounds};
use crate::pipeline::AnalysisResult;
use crate::rollup::Rollup;
use crate::summary::describe;

use super::sanitize::{self, JsonRow};

/// Columns projected into `anomalies.json`, in output order. Only those
/// present are emitted.
pub const DASHBOARD_COLUMNS: &[&str] = &[
    "hcpcs_cd",
    "hcpcs_desc",
    "rndrng_npi",
    "rndrng_prvdr_last_org_name",
    "rndrng_prvdr_first_name",
    "rndrng_prvdr_type",
    "rndrng_prvdr_state_abrvtn",
    "rndrng_prvdr_city",
    "place_of_srvc_label",
    "tot_benes",
    "tot_srvcs",
    "avg_sbmtd_chrg_amt",
    "avg_mdcr_alowd_amt",
    "avg_mdcr_pymt_amt",
    "avg_mdcr_stdzd_amt",
    "submitted_to_payment_ratio",
    "payment_to_allowed_ratio",
    "anomaly_method",
    "anomaly_metric",
    "anomaly_metric_label",
    "anomaly_reason",
    "group_size",
];

/// Pick the cost column: an explicit choice present in the table, else the
/// first present priority column, else the first numeric column, else the
/// fallback name.
pub fn pick_cost_column(
    table: &RecordTable,
    explicit: Option<&str>,
    priority: &[String],
) -> String {
    if let Some(c) = explicit.filter(|c| table.has_column(c)) {
        return c.to_string();
    }
    if let Some(c) = priority.iter().find(|c| table.has_column(c)) {
        return c.clone();
    }
    table
        .first_numeric_column()
        .unwrap_or(FALLBACK_COST_COLUMN)
        .to_string()
}

/// Which well-known columns the analyzed table carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyColumnsPresent {
    pub hcpcs_cd: bool,
    pub hcpcs_desc: bool,
    pub rndrng_npi: bool,
    pub rndrng_prvdr_type: bool,
    pub rndrng_prvdr_state_abrvtn: bool,
    pub place_of_srvc_label: bool,
}

impl KeyColumnsPresent {
    pub fn of(table: &RecordTable) -> Self {
        Self {
            hcpcs_cd: table.has_column("hcpcs_cd"),
            hcpcs_desc: table.has_column("hcpcs_desc"),
            rndrng_npi: table.has_column("rndrng_npi"),
            rndrng_prvdr_type: table.has_column("rndrng_prvdr_type"),
            rndrng_prvdr_state_abrvtn: table.has_column("rndrng_prvdr_state_abrvtn"),
            place_of_srvc_label: table.has_column("place_of_srvc_label"),
        }
    }
}

/// `summary.json`. Non-finite statistics serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub rows: usize,
    pub columns: usize,
    pub cost_column: String,
    pub cost_mean: serde_json::Value,
    pub cost_median: serde_json::Value,
    pub cost_min: serde_json::Value,
    pub cost_max: serde_json::Value,
    pub cost_std: serde_json::Value,
    #[serde(rename = "Q1")]
    pub q1: serde_json::Value,
    #[serde(rename = "Q3")]
    pub q3: serde_json::Value,
    #[serde(rename = "IQR")]
    pub iqr: serde_json::Value,
    #[serde(rename = "IQR_lower_bound")]
    pub iqr_lower_bound: serde_json::Value,
    #[serde(rename = "IQR_upper_bound")]
    pub iqr_upper_bound: serde_json::Value,
    /// `None` when the cost column does not exist.
    pub missing_cost: Option<usize>,
    pub iqr_anomalies_count: usize,
    pub zscore_anomalies_count: usize,
    pub key_columns_present: KeyColumnsPresent,
}

impl DashboardSummary {
    pub fn build(
        table: &RecordTable,
        cost_column: &str,
        iqr_multiplier: f64,
        iqr_anomalies: usize,
        zscore_anomalies: usize,
    ) -> Self {
        let (values, missing_cost) = match table.column_index(cost_column) {
            Some(col) => {
                let coerced: Vec<Value> =
                    table.column_values(col).map(Value::coerce_numeric).collect();
                let missing = coerced.iter().filter(|v| v.is_missing()).count();
                let values: Vec<f64> = coerced.iter().filter_map(Value::finite).collect();
                (values, Some(missing))
            }
            None => (Vec::new(), None),
        };
        let stats = describe(&values);
        let bounds = IqrBounds::compute(&values, 1, iqr_multiplier);

        Self {
            rows: table.len(),
            columns: table.column_count(),
            cost_column: cost_column.to_string(),
            cost_mean: sanitize::optional(stats.map(|s| s.mean)),
            cost_median: sanitize::optional(stats.map(|s| s.median)),
            cost_min: sanitize::optional(stats.map(|s| s.min)),
            cost_max: sanitize::optional(stats.map(|s| s.max)),
            cost_std: sanitize::optional(stats.map(|s| s.std_dev)),
            q1: sanitize::optional(bounds.map(|b| b.q1)),
            q3: sanitize::optional(bounds.map(|b| b.q3)),
            iqr: sanitize::optional(bounds.map(|b| b.iqr)),
            iqr_lower_bound: sanitize::optional(bounds.map(|b| b.lower)),
            iqr_upper_bound: sanitize::optional(bounds.map(|b| b.upper)),
            missing_cost,
            iqr_anomalies_count: iqr_anomalies,
            zscore_anomalies_count: zscore_anomalies,
            key_columns_present: KeyColumnsPresent::of(table),
        }
    }
}

/// `top_groups.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopGroups {
    pub top_iqr_groups: Vec<JsonRow>,
    pub top_zscore_groups: Vec<JsonRow>,
}

/// All three dashboard payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardExport {
    pub summary: DashboardSummary,
    pub anomalies: Vec<JsonRow>,
    pub top_groups: TopGroups,
}

impl DashboardExport {
    pub fn build(
        table: &RecordTable,
        result: &AnalysisResult,
        config: &ExportConfig,
        iqr_multiplier: f64,
    ) -> Self {
        let cost_column = pick_cost_column(
            table,
            config.cost_column.as_deref(),
            &config.effective_cost_priority(),
        );
        let detection = &result.detection;
        let summary = DashboardSummary::build(
            table,
            &cost_column,
            iqr_multiplier,
            detection.iqr.len(),
            detection.zscore.len(),
        );
        let anomalies = anomaly_payload(
            &[&detection.iqr, &detection.zscore],
            &cost_column,
            config.effective_max_records(),
        );
        let top_n = config.effective_dashboard_top_n();
        let group_column = &result.group_column;
        let label_column = &result.group_label_column;
        let top_groups = TopGroups {
            top_iqr_groups: rollup_payload(&result.iqr_rollup, group_column, label_column, top_n),
            top_zscore_groups: rollup_payload(
                &result.zscore_rollup,
                group_column,
                label_column,
                top_n,
            ),
        };

        tracing::debug!(
            cost_column = %cost_column,
            exported = anomalies.len(),
            "built dashboard payloads"
        );

        Self {
            summary,
            anomalies,
            top_groups,
        }
    }

    pub fn summary_json(&self) -> Result<String, ExportError> {
        to_json(&self.summary, "summary.json")
    }

    pub fn anomalies_json(&self) -> Result<String, ExportError> {
        to_json(&self.anomalies, "anomalies.json")
    }

    pub fn top_groups_json(&self) -> Result<String, ExportError> {
        to_json(&self.top_groups, "top_groups.json")
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, artifact: &str) -> Result<String, ExportError> {
    serde_json::to_string_pretty(value).map_err(|e| ExportError::Json {
        artifact: artifact.to_string(),
        message: e.to_string(),
    })
}

/// Concatenate `sets` in order, project onto [`DASHBOARD_COLUMNS`], sort
/// descending by the cost column (missing or non-finite last, ties in
/// concatenation order), and keep at most `max_records`.
pub fn anomaly_payload(
    sets: &[&AnomalySet],
    cost_column: &str,
    max_records: usize,
) -> Vec<JsonRow> {
    let present = |c: &str| {
        sets.iter().any(|s| s.attribute_columns.iter().any(|a| a == c))
            || !is_attribute_column(c)
    };
    let columns: Vec<&str> = DASHBOARD_COLUMNS
        .iter()
        .copied()
        .filter(|c| present(*c))
        .collect();
    let sort_column = [cost_column, PAYMENT_COLUMN]
        .into_iter()
        .find(|c| columns.contains(c));

    let mut rows: Vec<(Option<f64>, JsonRow)> = sets
        .iter()
        .flat_map(|set| set.iter().map(move |r| (*set, r)))
        .map(|(set, record)| {
            let key = sort_column
                .and_then(|c| set.attribute(record, c))
                .and_then(|v| v.coerce_numeric().finite());
            (key, project(set, record, &columns))
        })
        .collect();

    if sort_column.is_some() {
        // stable: equal keys keep concatenation order
        rows.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(x), Some(y)) => y.total_cmp(x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }
    rows.truncate(max_records);
    rows.into_iter().map(|(_, row)| row).collect()
}

fn is_attribute_column(column: &str) -> bool {
    !matches!(
        column,
        "anomaly_method" | "anomaly_metric" | "anomaly_metric_label" | "anomaly_reason" | "group_size"
    )
}

fn project(set: &AnomalySet, record: &AnomalyRecord, columns: &[&str]) -> JsonRow {
    let mut row = JsonRow::new();
    for &c in columns {
        let value = match c {
            "anomaly_method" => serde_json::Value::from(record.method.name()),
            "anomaly_metric" => serde_json::Value::from(record.metric.as_str()),
            "anomaly_metric_label" => serde_json::Value::from(record.metric_label.as_str()),
            "anomaly_reason" => serde_json::Value::from(record.reason.as_str()),
            "group_size" => serde_json::Value::from(record.group_size),
            _ => set
                .attribute(record, c)
                .map_or(serde_json::Value::Null, sanitize::cell),
        };
        row.push(c, value);
    }
    row
}

/// Rollup entries as rows keyed `anomaly_metric, <group>, <label>, count`.
pub fn rollup_payload(
    rollup: &Rollup,
    group_column: &str,
    label_column: &str,
    top_n: usize,
) -> Vec<JsonRow> {
    rollup
        .entries
        .iter()
        .take(top_n)
        .map(|e| {
            let mut row = JsonRow::new();
            row.push("anomaly_metric", serde_json::Value::from(e.metric.as_str()));
            row.push(group_column, serde_json::Value::from(e.group_value.as_str()));
            row.push(
                label_column,
                e.group_label
                    .as_deref()
                    .map_or(serde_json::Value::Null, serde_json::Value::from),
            );
            row.push("count", serde_json::Value::from(e.count));
            row
        })
        .collect()
}
