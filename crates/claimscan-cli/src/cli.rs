//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use claimscan_core::config::CliOverrides;

/// Grouped IQR / Z-score anomaly detection over provider billing extracts.
#[derive(Parser)]
#[command(name = "claimscan")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (default: claimscan.toml in the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimum rows a group needs before it is analyzed
    #[arg(long, global = true)]
    pub min_group_size: Option<usize>,

    /// Z-score threshold; scores strictly above it are flagged
    #[arg(long, global = true)]
    pub z_threshold: Option<f64>,

    /// Column used to rank and summarize the dashboard export
    #[arg(long, global = true)]
    pub cost_column: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_path: self.config.clone(),
            min_group_size: self.min_group_size,
            z_threshold: self.z_threshold,
            cost_column: self.cost_column.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize a raw extract and write the cleaned table and profile
    Clean(IoArgs),
    /// Detect anomalies in a cleaned table and write reports and exports
    Analyze(IoArgs),
    /// Clean a raw extract, then analyze it
    Run(IoArgs),
}

#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// Input CSV
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory receiving every artifact
    #[arg(short, long, default_value = "outputs")]
    pub out_dir: PathBuf,
}
