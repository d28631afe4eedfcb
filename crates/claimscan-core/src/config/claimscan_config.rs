//! Top-level claimscan configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DetectionConfig, ExportConfig, IngestConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CLAIMSCAN_*`)
/// 3. Config file (explicit `--config`, else `claimscan.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClaimscanConfig {
    pub ingest: IngestConfig,
    pub detection: DetectionConfig,
    pub export: ExportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<std::path::PathBuf>,
    pub min_group_size: Option<usize>,
    pub z_threshold: Option<f64>,
    pub cost_column: Option<String>,
}

impl ClaimscanConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: explicit config file, else project config
        match cli_overrides.and_then(|c| c.config_path.as_deref()) {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ClaimscanConfig) -> Result<(), ConfigError> {
        let d = &config.detection;
        if d.min_group_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "detection.min_group_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(n) = d.min_iqr_samples {
            if n < 2 {
                return Err(ConfigError::ValidationFailed {
                    field: "detection.min_iqr_samples".to_string(),
                    message: "must be at least 2".to_string(),
                });
            }
        }
        if let Some(k) = d.iqr_multiplier {
            if !k.is_finite() || k <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "detection.iqr_multiplier".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        if let Some(z) = d.z_threshold {
            if !z.is_finite() || z <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "detection.z_threshold".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        if let Some(dup) = d.metrics.iter().enumerate().find_map(|(i, m)| {
            d.metrics[..i]
                .iter()
                .any(|prev| prev.column == m.column)
                .then_some(&m.column)
        }) {
            return Err(ConfigError::ValidationFailed {
                field: "detection.metrics".to_string(),
                message: format!("metric column '{}' listed twice", dup),
            });
        }
        if config.export.max_records == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "export.max_records".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ClaimscanConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ClaimscanConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it is set.
    fn merge(base: &mut ClaimscanConfig, other: &ClaimscanConfig) {
        // Ingest
        if !other.ingest.aliases.is_empty() {
            base.ingest.aliases = other.ingest.aliases.clone();
        }
        if other.ingest.drop_duplicates.is_some() {
            base.ingest.drop_duplicates = other.ingest.drop_duplicates;
        }

        // Detection
        let (bd, od) = (&mut base.detection, &other.detection);
        if od.group_column.is_some() {
            bd.group_column = od.group_column.clone();
        }
        if od.group_label_column.is_some() {
            bd.group_label_column = od.group_label_column.clone();
        }
        if od.group_display_name.is_some() {
            bd.group_display_name = od.group_display_name.clone();
        }
        if od.min_group_size.is_some() {
            bd.min_group_size = od.min_group_size;
        }
        if od.min_iqr_samples.is_some() {
            bd.min_iqr_samples = od.min_iqr_samples;
        }
        if od.iqr_multiplier.is_some() {
            bd.iqr_multiplier = od.iqr_multiplier;
        }
        if od.z_threshold.is_some() {
            bd.z_threshold = od.z_threshold;
        }
        if !od.metrics.is_empty() {
            bd.metrics = od.metrics.clone();
        }
        if !od.identifying_columns.is_empty() {
            bd.identifying_columns = od.identifying_columns.clone();
        }

        // Export
        let (be, oe) = (&mut base.export, &other.export);
        if oe.cost_column.is_some() {
            be.cost_column = oe.cost_column.clone();
        }
        if !oe.cost_priority.is_empty() {
            be.cost_priority = oe.cost_priority.clone();
        }
        if oe.max_records.is_some() {
            be.max_records = oe.max_records;
        }
        if oe.rollup_top_n.is_some() {
            be.rollup_top_n = oe.rollup_top_n;
        }
        if oe.dashboard_top_n.is_some() {
            be.dashboard_top_n = oe.dashboard_top_n;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CLAIMSCAN_MIN_GROUP_SIZE`, `CLAIMSCAN_Z_THRESHOLD`, etc.
    fn apply_env_overrides(config: &mut ClaimscanConfig) {
        if let Ok(val) = std::env::var("CLAIMSCAN_GROUP_COLUMN") {
            config.detection.group_column = Some(val);
        }
        if let Ok(val) = std::env::var("CLAIMSCAN_MIN_GROUP_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.detection.min_group_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CLAIMSCAN_Z_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.detection.z_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CLAIMSCAN_IQR_MULTIPLIER") {
            if let Ok(v) = val.parse::<f64>() {
                config.detection.iqr_multiplier = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CLAIMSCAN_COST_COLUMN") {
            config.export.cost_column = Some(val);
        }
        if let Ok(val) = std::env::var("CLAIMSCAN_MAX_EXPORT_RECORDS") {
            if let Ok(v) = val.parse::<usize>() {
                config.export.max_records = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ClaimscanConfig, cli: &CliOverrides) {
        if let Some(v) = cli.min_group_size {
            config.detection.min_group_size = Some(v);
        }
        if let Some(v) = cli.z_threshold {
            config.detection.z_threshold = Some(v);
        }
        if let Some(ref v) = cli.cost_column {
            config.export.cost_column = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
