//! Pipeline errors.

use super::error_code::ClaimscanErrorCode;
use super::{ConfigError, DataError, ExportError};

/// Errors that can occur during a full clean → analyze → export run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl ClaimscanErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Data(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
        }
    }
}
