//! Top-group rollups: anomaly counts per (metric, group, label).

use serde::Serialize;

use claimscan_core::types::FxHashMap;

use crate::outliers::{AnomalyMethod, AnomalySet};

/// One rollup row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollupEntry {
    pub metric: String,
    pub group_value: String,
    pub group_label: Option<String>,
    pub count: usize,
}

/// Ranked rollup for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollup {
    pub method: AnomalyMethod,
    pub entries: Vec<RollupEntry>,
    /// Distinct keys before truncation.
    pub distinct_keys: usize,
}

impl Rollup {
    /// Count `set` by (metric, group value, group label), rank by count
    /// descending, keep `top_n`. Equal counts keep the order in which
    /// their key first appears in the set. A missing label is its own key.
    pub fn build(set: &AnomalySet, top_n: usize) -> Self {
        let mut index: FxHashMap<(&str, &str, Option<&str>), usize> = FxHashMap::default();
        let mut entries: Vec<RollupEntry> = Vec::new();

        for record in set.iter() {
            let key = (
                record.metric.as_str(),
                record.group_value.as_str(),
                record.group_label.as_deref(),
            );
            match index.get(&key) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(key, entries.len());
                    entries.push(RollupEntry {
                        metric: record.metric.clone(),
                        group_value: record.group_value.clone(),
                        group_label: record.group_label.clone(),
                        count: 1,
                    });
                }
            }
        }

        let distinct_keys = entries.len();
        // sort_by is stable
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(top_n);

        Self {
            method: set.method,
            entries,
            distinct_keys,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of counts over the kept entries.
    pub fn covered_rows(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}
