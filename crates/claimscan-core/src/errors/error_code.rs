//! ClaimscanErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so callers (the CLI, tests, a future
/// service wrapper) can match on a code instead of a message.
pub trait ClaimscanErrorCode {
    /// Returns the error code string (e.g., "MISSING_COLUMN").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
pub const MALFORMED_INPUT: &str = "MALFORMED_INPUT";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const EXPORT_ERROR: &str = "EXPORT_ERROR";
