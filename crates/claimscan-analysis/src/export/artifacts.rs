//! In-memory artifact bundle. Every artifact is rendered before any is
//! written.

use std::path::{Path, PathBuf};

use claimscan_core::constants::{
    ANALYSIS_SUMMARY_FILE, ANOMALIES_IQR_FILE, ANOMALIES_JSON_FILE, ANOMALIES_ZSCORE_FILE,
    CLEANED_TABLE_FILE, CLEANING_PROFILE_FILE, SUMMARY_JSON_FILE, TOP_GROUPS_JSON_FILE,
    TOP_IQR_GROUPS_FILE, TOP_ZSCORE_GROUPS_FILE,
};
use claimscan_core::{ClaimscanConfig, ExportError, RecordTable};

use crate::ingest::CleaningProfile;
use crate::pipeline::AnalysisResult;

use super::dashboard::DashboardExport;
use super::tables::{anomalies_csv, rollup_csv, table_csv};

pub const DATA_DIR: &str = "data";
pub const REPORT_DIR: &str = "report";
pub const ANOMALIES_DIR: &str = "anomalies";
pub const TABLES_DIR: &str = "tables";

/// One output file, path relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>, contents: String) {
        self.artifacts.push(Artifact {
            path: path.into(),
            contents,
        });
    }

    pub fn extend(&mut self, other: ArtifactSet) {
        self.artifacts.extend(other.artifacts);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Artifact> {
        let path = path.as_ref();
        self.artifacts.iter().find(|a| a.path == path)
    }

    /// Cleaned table CSV and the cleaning profile. `raw_path` is echoed in
    /// the profile.
    pub fn cleaning(
        table: &RecordTable,
        profile: &CleaningProfile,
        raw_path: &Path,
        out_dir: &Path,
    ) -> Result<Self, ExportError> {
        let clean_rel = Path::new(DATA_DIR).join(CLEANED_TABLE_FILE);
        let mut set = Self::new();
        set.push(&clean_rel, table_csv(table, CLEANED_TABLE_FILE)?);
        set.push(
            Path::new(REPORT_DIR).join(CLEANING_PROFILE_FILE),
            profile.render_text(
                &raw_path.display().to_string(),
                &out_dir.join(&clean_rel).display().to_string(),
            ),
        );
        Ok(set)
    }

    /// Anomaly CSVs, rollup tables, the summary report, and the three
    /// dashboard JSON files.
    pub fn analysis(
        table: &RecordTable,
        result: &AnalysisResult,
        config: &ClaimscanConfig,
    ) -> Result<Self, ExportError> {
        let detection = &result.detection;
        let anomalies = Path::new(ANOMALIES_DIR);
        let tables = Path::new(TABLES_DIR);

        let mut set = Self::new();
        set.push(
            anomalies.join(ANOMALIES_IQR_FILE),
            anomalies_csv(&detection.iqr, ANOMALIES_IQR_FILE)?,
        );
        set.push(
            anomalies.join(ANOMALIES_ZSCORE_FILE),
            anomalies_csv(&detection.zscore, ANOMALIES_ZSCORE_FILE)?,
        );
        set.push(
            tables.join(TOP_IQR_GROUPS_FILE),
            rollup_csv(
                &result.iqr_rollup,
                &result.group_column,
                &result.group_label_column,
                TOP_IQR_GROUPS_FILE,
            )?,
        );
        set.push(
            tables.join(TOP_ZSCORE_GROUPS_FILE),
            rollup_csv(
                &result.zscore_rollup,
                &result.group_column,
                &result.group_label_column,
                TOP_ZSCORE_GROUPS_FILE,
            )?,
        );
        set.push(
            Path::new(REPORT_DIR).join(ANALYSIS_SUMMARY_FILE),
            result.summary.render_text(),
        );

        let dashboard = DashboardExport::build(
            table,
            result,
            &config.export,
            config.detection.effective_iqr_multiplier(),
        );
        set.push(SUMMARY_JSON_FILE, dashboard.summary_json()?);
        set.push(ANOMALIES_JSON_FILE, dashboard.anomalies_json()?);
        set.push(TOP_GROUPS_JSON_FILE, dashboard.top_groups_json()?);
        Ok(set)
    }

    /// Write every artifact under `out_dir`, creating directories.
    pub fn write_all(&self, out_dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        let mut written = Vec::with_capacity(self.artifacts.len());
        for artifact in &self.artifacts {
            let path = out_dir.join(&artifact.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ExportError::Write {
                    path: parent.display().to_string(),
                    message: e.to_string(),
                })?;
            }
            std::fs::write(&path, &artifact.contents).map_err(|e| ExportError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            tracing::debug!(
                path = %path.display(),
                bytes = artifact.contents.len(),
                "wrote artifact"
            );
            written.push(path);
        }
        Ok(written)
    }
}
