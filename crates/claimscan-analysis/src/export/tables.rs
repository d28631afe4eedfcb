//! CSV renderings of the cleaned table, anomaly sets, and rollups.

use claimscan_core::types::value::format_number;
use claimscan_core::{ExportError, RecordTable};

use crate::outliers::{AnomalyMethod, AnomalyRecord, AnomalySet, Evidence};
use crate::rollup::Rollup;

/// Provenance columns written after the identifying columns.
pub const PROVENANCE_COLUMNS: &[&str] = &[
    "anomaly_method",
    "anomaly_metric",
    "anomaly_metric_label",
    "group_key",
    "group_value",
    "group_size",
];

pub const IQR_COLUMNS: &[&str] = &["iqr_q1", "iqr_q3", "iqr", "iqr_upper_bound", "iqr_lower_bound"];

pub const ZSCORE_COLUMNS: &[&str] = &["z_score", "z_threshold"];

pub const REASON_COLUMN: &str = "anomaly_reason";

/// Header of an anomaly CSV for `set`.
pub fn anomaly_header(set: &AnomalySet) -> Vec<String> {
    let evidence = match set.method {
        AnomalyMethod::Iqr => IQR_COLUMNS,
        AnomalyMethod::ZScore => ZSCORE_COLUMNS,
    };
    set.attribute_columns
        .iter()
        .map(String::as_str)
        .chain(PROVENANCE_COLUMNS.iter().copied())
        .chain(evidence.iter().copied())
        .chain(std::iter::once(REASON_COLUMN))
        .map(str::to_string)
        .collect()
}

fn anomaly_row(record: &AnomalyRecord) -> Vec<String> {
    let mut row: Vec<String> = record.attributes.iter().map(|v| v.to_cell_string()).collect();
    row.extend([
        record.method.name().to_string(),
        record.metric.clone(),
        record.metric_label.clone(),
        record.group_key.clone(),
        record.group_value.clone(),
        record.group_size.to_string(),
    ]);
    match record.evidence {
        Evidence::Iqr(b) => row.extend([b.q1, b.q3, b.iqr, b.upper, b.lower].map(format_number)),
        Evidence::ZScore { score, threshold } => {
            row.extend([score, threshold].map(format_number))
        }
    }
    row.push(record.reason.clone());
    row
}

pub fn anomalies_csv(set: &AnomalySet, artifact: &str) -> Result<String, ExportError> {
    let mut rows = Vec::with_capacity(set.len());
    for record in set.iter() {
        rows.push(anomaly_row(record));
    }
    write_csv(artifact, &anomaly_header(set), rows)
}

/// Rollup CSV with columns `anomaly_metric, <group column>, <label column>, count`.
pub fn rollup_csv(
    rollup: &Rollup,
    group_column: &str,
    label_column: &str,
    artifact: &str,
) -> Result<String, ExportError> {
    let header = vec![
        "anomaly_metric".to_string(),
        group_column.to_string(),
        label_column.to_string(),
        "count".to_string(),
    ];
    let rows = rollup.entries.iter().map(|e| {
        vec![
            e.metric.clone(),
            e.group_value.clone(),
            e.group_label.clone().unwrap_or_default(),
            e.count.to_string(),
        ]
    });
    write_csv(artifact, &header, rows)
}

pub fn table_csv(table: &RecordTable, artifact: &str) -> Result<String, ExportError> {
    let rows = table
        .rows()
        .map(|r| r.iter().map(|v| v.to_cell_string()).collect::<Vec<_>>());
    write_csv(artifact, table.columns(), rows)
}

fn write_csv(
    artifact: &str,
    header: &[String],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<String, ExportError> {
    let err = |message: String| ExportError::Csv {
        artifact: artifact.to_string(),
        message,
    };
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header).map_err(|e| err(e.to_string()))?;
    for row in rows {
        writer.write_record(&row).map_err(|e| err(e.to_string()))?;
    }
    let bytes = writer.into_inner().map_err(|e| err(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| err(e.to_string()))
}
