//! Row-major record table with named columns.

use crate::errors::DataError;

use super::collections::FxHashMap;
use super::value::Value;

/// A fully materialized table of records.
///
/// Column order is preserved exactly as loaded; rows keep their input
/// order. The detector only ever reads from a table, every derived
/// collection is a fresh allocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    columns: Vec<String>,
    index: FxHashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl RecordTable {
    /// Create an empty table with the given columns. On duplicate names
    /// the first occurrence wins lookups.
    pub fn new(columns: Vec<String>) -> Self {
        let mut index = FxHashMap::default();
        for (i, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            columns,
            index,
            rows: Vec::new(),
        }
    }

    /// Create a table from columns and rows, checking every row's width.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, DataError> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Resolve a column or fail with the missing column's name.
    pub fn require_column(&self, name: &str) -> Result<usize, DataError> {
        self.column_index(name)
            .ok_or_else(|| DataError::missing_column(name))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn value(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    /// Cell lookup by column name; missing when the column does not exist.
    pub fn get(&self, row: usize, column: &str) -> &Value {
        const MISSING: &Value = &Value::Missing;
        match self.column_index(column) {
            Some(col) => &self.rows[row][col],
            None => MISSING,
        }
    }

    /// All cells of one column, in row order.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |r| &r[col])
    }

    /// Finite numeric values of a column, in row order, missing and
    /// non-finite cells skipped.
    pub fn finite_values(&self, col: usize) -> Vec<f64> {
        self.column_values(col).filter_map(Value::finite).collect()
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), DataError> {
        if row.len() != self.columns.len() {
            return Err(DataError::Malformed {
                row: self.rows.len(),
                message: format!(
                    "expected {} cells, found {}",
                    self.columns.len(),
                    row.len()
                ),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a column, or overwrite it in place if it already exists.
    /// `values` must hold one entry per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<(), DataError> {
        if values.len() != self.rows.len() {
            return Err(DataError::Malformed {
                row: values.len().min(self.rows.len()),
                message: format!(
                    "column '{}' has {} values for {} rows",
                    name,
                    values.len(),
                    self.rows.len()
                ),
            });
        }
        match self.column_index(name) {
            Some(col) => {
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row[col] = v;
                }
            }
            None => {
                self.index.insert(name.to_string(), self.columns.len());
                self.columns.push(name.to_string());
                for (row, v) in self.rows.iter_mut().zip(values) {
                    row.push(v);
                }
            }
        }
        Ok(())
    }

    /// Rewrite every cell of a column with `f`. No-op for unknown columns.
    pub fn map_column(&mut self, name: &str, mut f: impl FnMut(&Value) -> Value) {
        if let Some(col) = self.column_index(name) {
            for row in &mut self.rows {
                row[col] = f(&row[col]);
            }
        }
    }

    /// Coerce a column to numbers; unparsable cells become missing.
    pub fn coerce_numeric_column(&mut self, name: &str) -> Result<(), DataError> {
        self.require_column(name)?;
        self.map_column(name, Value::coerce_numeric);
        Ok(())
    }

    /// Rename columns in place. Names absent from the table are ignored.
    pub fn rename_columns(&mut self, renames: &[(String, String)]) {
        for (from, to) in renames {
            if from == to {
                continue;
            }
            if let Some(col) = self.index.remove(from) {
                self.columns[col] = to.clone();
                self.index.insert(to.clone(), col);
            }
        }
    }

    /// Keep only rows for which `keep` returns true, preserving order.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[Value]) -> bool) {
        self.rows.retain(|r| keep(r));
    }

    /// A column is numeric when it has at least one number and every
    /// non-missing cell is a number.
    pub fn is_numeric_column(&self, col: usize) -> bool {
        let mut seen_number = false;
        for v in self.column_values(col) {
            match v {
                Value::Number(_) => seen_number = true,
                Value::Text(_) => return false,
                Value::Missing => {}
            }
        }
        seen_number
    }

    /// First numeric column in schema order.
    pub fn first_numeric_column(&self) -> Option<&str> {
        (0..self.columns.len())
            .find(|&c| self.is_numeric_column(c))
            .map(|c| self.columns[c].as_str())
    }

    /// Count of missing cells in a column.
    pub fn missing_count(&self, col: usize) -> usize {
        self.column_values(col).filter(|v| v.is_missing()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RecordTable {
        RecordTable::from_rows(
            vec!["code".into(), "amt".into()],
            vec![
                vec![Value::from("A"), Value::from("10")],
                vec![Value::from("B"), Value::from("oops")],
                vec![Value::Missing, Value::from("30")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn require_column_names_the_missing_field() {
        let err = table().require_column("nope").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { ref column } if column == "nope"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let mut t = table();
        assert!(t.push_row(vec![Value::Missing]).is_err());
    }

    #[test]
    fn coercion_keeps_rows_and_marks_garbage_missing() {
        let mut t = table();
        t.coerce_numeric_column("amt").unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.get(1, "amt"), &Value::Missing);
        assert_eq!(t.finite_values(1), vec![10.0, 30.0]);
        assert!(t.is_numeric_column(1));
        assert_eq!(t.first_numeric_column(), Some("amt"));
    }

    #[test]
    fn set_column_appends_then_overwrites() {
        let mut t = table();
        t.set_column("flag", vec![Value::from(1.0); 3]).unwrap();
        assert_eq!(t.column_count(), 3);
        t.set_column("flag", vec![Value::from(2.0); 3]).unwrap();
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.get(2, "flag"), &Value::Number(2.0));
    }

    #[test]
    fn set_column_rejects_wrong_length() {
        let mut t = table();
        let err = t.set_column("flag", vec![Value::Missing; 2]).unwrap_err();
        assert!(matches!(err, DataError::Malformed { .. }));
        assert!(!t.has_column("flag"));
        assert_eq!(t.column_count(), 2);
    }

    #[test]
    fn rename_moves_the_index() {
        let mut t = table();
        t.rename_columns(&[("amt".into(), "amount".into())]);
        assert!(!t.has_column("amt"));
        assert_eq!(t.column_index("amount"), Some(1));
    }
}
