//! Input data errors. All of these are structural precondition failures:
//! they abort a run before any artifact is written.

use super::error_code::{self, ClaimscanErrorCode};

/// Errors raised while loading or validating a record table.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Input table is empty: {context}")]
    EmptyInput { context: String },

    #[error("Malformed input at row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
}

impl DataError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }
}

impl ClaimscanErrorCode for DataError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            Self::EmptyInput { .. } => error_code::EMPTY_INPUT,
            Self::Malformed { .. } => error_code::MALFORMED_INPUT,
            Self::Read { .. } => error_code::IO_ERROR,
        }
    }
}
