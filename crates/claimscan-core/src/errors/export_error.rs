//! Export errors.

use super::error_code::{self, ClaimscanErrorCode};

/// Errors that can occur while serializing or writing artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON serialization failed for {artifact}: {message}")]
    Json { artifact: String, message: String },

    #[error("CSV serialization failed for {artifact}: {message}")]
    Csv { artifact: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

impl ClaimscanErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Write { .. } => error_code::IO_ERROR,
            _ => error_code::EXPORT_ERROR,
        }
    }
}
