//! claimscan-analysis: the grouped anomaly engine and its collaborators.
//!
//! - `ingest`: raw CSV → normalized record table
//! - `grouping`: partition by service code, size guard
//! - `outliers`: per-group IQR and Z-score detection
//! - `rollup`: top-group anomaly counts
//! - `summary`: global statistics and the text report
//! - `export`: JSON-safe dashboard payloads and CSV tables
//! - `pipeline`: validate → detect → roll up → summarize

pub mod export;
pub mod grouping;
pub mod ingest;
pub mod outliers;
pub mod pipeline;
pub mod rollup;
pub mod summary;

pub use outliers::{AnomalyMethod, AnomalyRecord, AnomalySet, Detection, GroupedAnomalyDetector};
pub use pipeline::{AnalysisPipeline, AnalysisResult};
