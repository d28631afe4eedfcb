//! Configuration system for claimscan.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod claimscan_config;
pub mod detection_config;
pub mod export_config;
pub mod ingest_config;

pub use claimscan_config::{ClaimscanConfig, CliOverrides};
pub use detection_config::{DetectionConfig, MetricSpec};
pub use export_config::ExportConfig;
pub use ingest_config::{AliasSpec, IngestConfig};
