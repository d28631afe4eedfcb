//! Raw table → normalized record table.

use claimscan_core::config::IngestConfig;
use claimscan_core::constants::{
    ALLOWED_COLUMN, PAYMENT_COLUMN, PAYMENT_TO_ALLOWED_RATIO_COLUMN, PLACE_OF_SERVICE_COLUMN,
    PLACE_OF_SERVICE_LABEL_COLUMN, STANDARDIZED_COLUMN, SUBMITTED_COLUMN,
    SUBMITTED_TO_PAYMENT_RATIO_COLUMN,
};
use claimscan_core::types::FxHashSet;
use claimscan_core::{DataError, RecordTable, Value};

use super::coerce::{clean_code, clean_text, coerce_money_value};
use super::columns::normalize_schema;
use super::profile::CleaningProfile;

/// Categorical columns that get whitespace and null-token cleanup.
const TEXT_COLUMNS: &[&str] = &[
    "hcpcs_cd",
    "hcpcs_desc",
    "rndrng_prvdr_type",
    PLACE_OF_SERVICE_COLUMN,
    "hcpcs_drug_ind",
];

/// Money and count columns: coerced, negatives treated as missing.
const NUMERIC_COLUMNS: &[&str] = &[
    "tot_srvcs",
    "tot_benes",
    SUBMITTED_COLUMN,
    ALLOWED_COLUMN,
    PAYMENT_COLUMN,
    STANDARDIZED_COLUMN,
];

/// Result of cleaning a raw table.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub table: RecordTable,
    pub profile: CleaningProfile,
}

/// Normalizes a raw billing extract into the canonical schema.
pub struct TableCleaner {
    aliases: Vec<(String, Vec<String>)>,
    drop_duplicates: bool,
}

impl TableCleaner {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            aliases: config.effective_aliases(),
            drop_duplicates: config.effective_drop_duplicates(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&IngestConfig::default())
    }

    /// Clean a raw table. Columns the extract lacks are not derived.
    pub fn clean(&self, mut table: RecordTable) -> Result<CleaningOutcome, DataError> {
        let original_columns = table.column_count();
        let renames = normalize_schema(&mut table, &self.aliases);
        tracing::debug!(renamed = renames.len(), "resolved column aliases");

        for col in TEXT_COLUMNS {
            table.map_column(col, clean_text);
        }
        table.map_column("hcpcs_cd", clean_code);
        if let Some(pos) = table.column_index(PLACE_OF_SERVICE_COLUMN) {
            table.map_column(PLACE_OF_SERVICE_COLUMN, clean_code);
            let labels = table
                .column_values(pos)
                .map(place_of_service_label)
                .collect();
            table.set_column(PLACE_OF_SERVICE_LABEL_COLUMN, labels)?;
        }

        for col in NUMERIC_COLUMNS {
            table.map_column(col, coerce_money_value);
        }

        let has_payment = table.has_column(PAYMENT_COLUMN);
        let has_submitted = table.has_column(SUBMITTED_COLUMN);
        let anchor = if has_payment {
            table.column_index(PAYMENT_COLUMN)
        } else if has_submitted {
            table.column_index(SUBMITTED_COLUMN)
        } else {
            None
        };
        if let Some(col) = anchor {
            table.retain_rows(|row| row[col].as_f64().is_some());
        }

        for col in NUMERIC_COLUMNS {
            table.map_column(col, |v| match v.as_f64() {
                Some(n) if n < 0.0 => Value::Missing,
                _ => v.clone(),
            });
        }

        if has_payment {
            let logs = log1p_column(&table, PAYMENT_COLUMN);
            table.set_column("log_payment", logs)?;
        }
        if has_submitted {
            let logs = log1p_column(&table, SUBMITTED_COLUMN);
            table.set_column("log_submitted", logs)?;
        }
        if has_submitted && has_payment {
            let ratio = ratio_column(&table, SUBMITTED_COLUMN, PAYMENT_COLUMN);
            table.set_column(SUBMITTED_TO_PAYMENT_RATIO_COLUMN, ratio)?;
        }
        if has_payment && table.has_column(ALLOWED_COLUMN) {
            let ratio = ratio_column(&table, PAYMENT_COLUMN, ALLOWED_COLUMN);
            table.set_column(PAYMENT_TO_ALLOWED_RATIO_COLUMN, ratio)?;
        }

        let before = table.len();
        if self.drop_duplicates {
            drop_duplicate_rows(&mut table);
        }
        let duplicates_removed = before - table.len();

        tracing::info!(
            rows = table.len(),
            columns = table.column_count(),
            duplicates_removed,
            "cleaning done"
        );

        let profile = CleaningProfile::build(&table, original_columns, duplicates_removed);
        Ok(CleaningOutcome { table, profile })
    }
}

fn place_of_service_label(code: &Value) -> Value {
    match code.as_str() {
        Some("F") => Value::from("Facility"),
        Some("O") => Value::from("Office"),
        _ => Value::from("Unknown"),
    }
}

fn log1p_column(table: &RecordTable, column: &str) -> Vec<Value> {
    let Some(col) = table.column_index(column) else {
        return vec![Value::Missing; table.len()];
    };
    table
        .column_values(col)
        .map(|v| v.as_f64().map(f64::ln_1p).into())
        .collect()
}

/// `numerator / denominator`, missing when either side is missing or the
/// denominator is zero.
fn ratio_column(table: &RecordTable, numerator: &str, denominator: &str) -> Vec<Value> {
    let (Some(n), Some(d)) = (table.column_index(numerator), table.column_index(denominator)) else {
        return vec![Value::Missing; table.len()];
    };
    table
        .rows()
        .map(|row| match (row[n].as_f64(), row[d].as_f64()) {
            (Some(a), Some(b)) if b != 0.0 => Value::Number(a / b),
            _ => Value::Missing,
        })
        .collect()
}

/// Remove exact duplicate rows, keeping the first occurrence.
fn drop_duplicate_rows(table: &mut RecordTable) {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    table.retain_rows(|row| seen.insert(row_key(row)));
}

fn row_key(row: &[Value]) -> String {
    let mut key = String::new();
    for v in row {
        match v {
            Value::Missing => key.push('\u{0}'),
            Value::Text(s) => {
                key.push('t');
                key.push_str(s);
            }
            Value::Number(n) => {
                key.push('n');
                key.push_str(&n.to_bits().to_string());
            }
        }
        key.push('\u{1f}');
    }
    key
}
