//! claimscan: per-service billing anomaly detection.
//!
//! Usage:
//!   claimscan clean   --input raw.csv     --out-dir outputs
//!   claimscan analyze --input cleaned.csv --out-dir outputs
//!   claimscan run     --input raw.csv     --out-dir outputs

mod cli;
mod commands;

use std::error::Error as StdError;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use claimscan_core::tracing::init_tracing;
use claimscan_core::{
    ClaimscanConfig, ClaimscanErrorCode, ConfigError, DataError, ExportError, PipelineError,
};

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match execute(&cli) {
        Ok(written) => {
            for path in written {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<Vec<PathBuf>> {
    let root = std::env::current_dir().context("resolving working directory")?;
    let config = ClaimscanConfig::load(&root, Some(&cli.overrides()))?;

    match &cli.command {
        Commands::Clean(args) => commands::clean(&config, args),
        Commands::Analyze(args) => commands::analyze(&config, args),
        Commands::Run(args) => commands::run(&config, args),
    }
}

/// Context messages down to the first claimscan error, which is rendered
/// with its `[CODE]` prefix.
fn render_error(err: &anyhow::Error) -> String {
    let mut parts = Vec::new();
    for cause in err.chain() {
        if let Some(coded) = coded_string(cause) {
            parts.push(coded);
            break;
        }
        parts.push(cause.to_string());
    }
    parts.join(": ")
}

fn coded_string(cause: &(dyn StdError + 'static)) -> Option<String> {
    if let Some(e) = cause.downcast_ref::<PipelineError>() {
        return Some(e.coded_string());
    }
    if let Some(e) = cause.downcast_ref::<DataError>() {
        return Some(e.coded_string());
    }
    if let Some(e) = cause.downcast_ref::<ConfigError>() {
        return Some(e.coded_string());
    }
    cause.downcast_ref::<ExportError>().map(ExportError::coded_string)
}
