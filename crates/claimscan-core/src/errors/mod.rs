//! Error handling for claimscan.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod data_error;
pub mod error_code;
pub mod export_error;
pub mod pipeline_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use error_code::ClaimscanErrorCode;
pub use export_error::ExportError;
pub use pipeline_error::PipelineError;
