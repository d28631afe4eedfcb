//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COST_PRIORITY, DEFAULT_DASHBOARD_TOP_N, DEFAULT_MAX_EXPORT_RECORDS,
    DEFAULT_ROLLUP_TOP_N,
};

/// Configuration for rollups and the dashboard export.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Explicit primary cost column. When unset it is picked from `cost_priority`.
    pub cost_column: Option<String>,
    /// Cost column candidates, highest priority first.
    pub cost_priority: Vec<String>,
    /// Cap on exported anomaly records. Default: 5000.
    pub max_records: Option<usize>,
    /// Entries per top-group rollup. Default: 20.
    pub rollup_top_n: Option<usize>,
    /// Rollup entries per method in `top_groups.json`. Default: 50.
    pub dashboard_top_n: Option<usize>,
}

impl ExportConfig {
    pub fn effective_cost_priority(&self) -> Vec<String> {
        if self.cost_priority.is_empty() {
            DEFAULT_COST_PRIORITY.iter().map(|c| c.to_string()).collect()
        } else {
            self.cost_priority.clone()
        }
    }

    pub fn effective_max_records(&self) -> usize {
        self.max_records.unwrap_or(DEFAULT_MAX_EXPORT_RECORDS)
    }

    pub fn effective_rollup_top_n(&self) -> usize {
        self.rollup_top_n.unwrap_or(DEFAULT_ROLLUP_TOP_N)
    }

    pub fn effective_dashboard_top_n(&self) -> usize {
        self.dashboard_top_n.unwrap_or(DEFAULT_DASHBOARD_TOP_N)
    }
}
