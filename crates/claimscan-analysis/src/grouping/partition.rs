//! Partition a record table by a categorical key.

use claimscan_core::types::FxHashMap;
use claimscan_core::{DataError, RecordTable, Value};

/// All rows sharing one key value, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    pub rows: Vec<usize>,
}

impl Group {
    /// Record count, regardless of metric presence.
    pub fn size(&self) -> usize {
        self.rows.len()
    }
}

/// Groups in first-seen key order.
#[derive(Debug, Clone, Default)]
pub struct GroupPartition {
    pub key_column: String,
    groups: Vec<Group>,
    index: FxHashMap<String, usize>,
    /// Rows whose key was missing or blank.
    pub unkeyed_rows: usize,
}

impl GroupPartition {
    /// Partition `table` on `key_column`.
    ///
    /// Fails on an empty table or when the key column is absent. Numeric
    /// keys are grouped by their rendered text so `99213` and `"99213"`
    /// land together.
    pub fn build(table: &RecordTable, key_column: &str) -> Result<Self, DataError> {
        if table.is_empty() {
            return Err(DataError::EmptyInput {
                context: format!("cannot group an empty table by {}", key_column),
            });
        }
        let col = table.require_column(key_column)?;

        let mut partition = Self {
            key_column: key_column.to_string(),
            ..Self::default()
        };
        for (row, cell) in table.column_values(col).enumerate() {
            let Some(key) = group_key(cell) else {
                partition.unkeyed_rows += 1;
                continue;
            };
            match partition.index.get(&key) {
                Some(&g) => partition.groups[g].rows.push(row),
                None => {
                    partition.index.insert(key.clone(), partition.groups.len());
                    partition.groups.push(Group {
                        key,
                        rows: vec![row],
                    });
                }
            }
        }
        Ok(partition)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Group> {
        self.index.get(key).map(|&g| &self.groups[g])
    }

    /// Key → size, in first-seen order.
    pub fn sizes(&self) -> Vec<(&str, usize)> {
        self.groups
            .iter()
            .map(|g| (g.key.as_str(), g.size()))
            .collect()
    }
}

fn group_key(cell: &Value) -> Option<String> {
    match cell {
        Value::Missing => None,
        Value::Text(s) if s.trim().is_empty() => None,
        Value::Text(s) => Some(s.clone()),
        Value::Number(n) if n.is_nan() => None,
        Value::Number(_) => Some(cell.to_cell_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(keys: &[Option<&str>]) -> RecordTable {
        RecordTable::from_rows(
            vec!["code".into()],
            keys.iter()
                .map(|k| vec![k.map_or(Value::Missing, Value::from)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn first_seen_order_and_row_order() {
        let t = table(&[Some("B"), Some("A"), Some("B"), None, Some("A"), Some(" ")]);
        let p = GroupPartition::build(&t, "code").unwrap();
        assert_eq!(p.sizes(), vec![("B", 2), ("A", 2)]);
        assert_eq!(p.get("B").unwrap().rows, vec![0, 2]);
        assert_eq!(p.unkeyed_rows, 2);
    }

    #[test]
    fn missing_key_column_is_named() {
        let t = table(&[Some("A")]);
        let err = GroupPartition::build(&t, "hcpcs_cd").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { ref column } if column == "hcpcs_cd"));
    }

    #[test]
    fn empty_table_is_rejected() {
        let t = table(&[]);
        assert!(matches!(
            GroupPartition::build(&t, "code"),
            Err(DataError::EmptyInput { .. })
        ));
    }
}
