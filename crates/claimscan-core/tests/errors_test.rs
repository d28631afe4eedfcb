//! Error code and conversion tests.

use claimscan_core::errors::{
    ClaimscanErrorCode, ConfigError, DataError, ExportError, PipelineError,
};

#[test]
fn missing_column_carries_the_field_name() {
    let err = DataError::missing_column("hcpcs_desc");
    assert_eq!(err.error_code(), "MISSING_COLUMN");
    assert_eq!(
        err.coded_string(),
        "[MISSING_COLUMN] Missing required column: hcpcs_desc"
    );
}

#[test]
fn pipeline_error_forwards_subsystem_codes() {
    let cases: Vec<(PipelineError, &str)> = vec![
        (
            DataError::EmptyInput {
                context: "x".into(),
            }
            .into(),
            "EMPTY_INPUT",
        ),
        (
            ConfigError::FileNotFound {
                path: "a.toml".into(),
            }
            .into(),
            "CONFIG_ERROR",
        ),
        (
            ExportError::Write {
                path: "out".into(),
                message: "denied".into(),
            }
            .into(),
            "IO_ERROR",
        ),
        (
            ExportError::Json {
                artifact: "summary.json".into(),
                message: "bad".into(),
            }
            .into(),
            "EXPORT_ERROR",
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code, "{}", err);
    }
}
