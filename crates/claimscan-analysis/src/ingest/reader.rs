//! CSV loading into a [`RecordTable`].

use std::io::Read;
use std::path::Path;

use claimscan_core::types::value::parse_number;
use claimscan_core::{DataError, RecordTable, Value};

/// Read a headed CSV file. Every cell is loaded as text; empty cells are
/// missing.
pub fn read_csv(path: &Path) -> Result<RecordTable, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let table = parse_csv(file)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.column_count(),
        "loaded csv"
    );
    Ok(table)
}

/// Parse headed CSV from any reader.
pub fn parse_csv<R: Read>(input: R) -> Result<RecordTable, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| DataError::Malformed {
            row: 0,
            message: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataError::EmptyInput {
            context: "csv has no header row".to_string(),
        });
    }

    let mut table = RecordTable::new(headers);
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| DataError::Malformed {
            row: i + 1,
            message: e.to_string(),
        })?;
        table.push_row(record.iter().map(Value::from_cell).collect())?;
    }
    Ok(table)
}

/// Coerce every column whose non-missing cells all parse as numbers,
/// mirroring how a dataframe reader types a cleaned extract. Columns in
/// `keep_text` stay textual (service codes like `99213` look numeric).
/// Returns the names of the coerced columns.
pub fn infer_numeric_columns(table: &mut RecordTable, keep_text: &[&str]) -> Vec<String> {
    let candidates: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| !keep_text.contains(&name.as_str()))
        .filter(|(col, _)| column_parses(table, *col))
        .map(|(_, name)| name.clone())
        .collect();

    for name in &candidates {
        table.map_column(name, Value::coerce_numeric);
    }
    candidates
}

fn column_parses(table: &RecordTable, col: usize) -> bool {
    let mut any = false;
    for v in table.column_values(col) {
        match v {
            Value::Missing => {}
            Value::Number(_) => any = true,
            Value::Text(s) => {
                if parse_number(s).is_none() {
                    return false;
                }
                any = true;
            }
        }
    }
    any
}
