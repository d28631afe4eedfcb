//! claimscan-core: shared foundation for the claimscan anomaly engine.
//!
//! Record table types, per-subsystem errors, TOML configuration,
//! tracing setup, and compiled defaults.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::ClaimscanConfig;
pub use errors::{ClaimscanErrorCode, ConfigError, DataError, ExportError, PipelineError};
pub use types::{RecordTable, Value};
