//! Subcommand drivers. Each builds its full artifact set in memory and
//! writes only after everything rendered.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use claimscan_analysis::export::artifacts::DATA_DIR;
use claimscan_analysis::export::ArtifactSet;
use claimscan_analysis::ingest::{infer_numeric_columns, parse_csv, read_csv, TableCleaner};
use claimscan_analysis::AnalysisPipeline;
use claimscan_core::constants::CLEANED_TABLE_FILE;
use claimscan_core::{ClaimscanConfig, RecordTable};

use crate::cli::IoArgs;

pub fn clean(config: &ClaimscanConfig, args: &IoArgs) -> Result<Vec<PathBuf>> {
    let artifacts = clean_artifacts(config, args)?;
    write(&artifacts, &args.out_dir)
}

pub fn analyze(config: &ClaimscanConfig, args: &IoArgs) -> Result<Vec<PathBuf>> {
    let mut table = read_csv(&args.input)
        .with_context(|| format!("reading cleaned table {}", args.input.display()))?;
    type_cleaned_table(config, &mut table);
    let artifacts = analysis_artifacts(config, &table)?;
    write(&artifacts, &args.out_dir)
}

/// Clean, then analyze the cleaned table exactly as `analyze` would read
/// it back from disk.
pub fn run(config: &ClaimscanConfig, args: &IoArgs) -> Result<Vec<PathBuf>> {
    let mut artifacts = clean_artifacts(config, args)?;

    let cleaned = artifacts
        .get(Path::new(DATA_DIR).join(CLEANED_TABLE_FILE))
        .context("cleaning produced no table")?;
    let mut table = parse_csv(cleaned.contents.as_bytes()).context("re-reading cleaned table")?;
    type_cleaned_table(config, &mut table);

    artifacts.extend(analysis_artifacts(config, &table)?);
    write(&artifacts, &args.out_dir)
}

fn clean_artifacts(config: &ClaimscanConfig, args: &IoArgs) -> Result<ArtifactSet> {
    let raw = read_csv(&args.input)
        .with_context(|| format!("reading raw extract {}", args.input.display()))?;
    let outcome = TableCleaner::new(&config.ingest).clean(raw)?;
    tracing::info!(
        rows = outcome.profile.rows_after_cleaning,
        duplicates_removed = outcome.profile.duplicates_removed,
        "cleaned extract"
    );
    let artifacts =
        ArtifactSet::cleaning(&outcome.table, &outcome.profile, &args.input, &args.out_dir)?;
    Ok(artifacts)
}

fn analysis_artifacts(config: &ClaimscanConfig, table: &RecordTable) -> Result<ArtifactSet> {
    let result = AnalysisPipeline::new(config.clone())
        .run(table)
        .context("analysis failed")?;
    Ok(ArtifactSet::analysis(table, &result, config)?)
}

/// Group key and label stay textual; every other all-numeric column is
/// typed as a number.
fn type_cleaned_table(config: &ClaimscanConfig, table: &mut RecordTable) {
    let d = &config.detection;
    let keep = [d.effective_group_column(), d.effective_group_label_column()];
    let coerced = infer_numeric_columns(table, &keep);
    tracing::debug!(columns = coerced.len(), "typed numeric columns");
}

fn write(artifacts: &ArtifactSet, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let written = artifacts
        .write_all(out_dir)
        .with_context(|| format!("writing artifacts under {}", out_dir.display()))?;
    tracing::info!(files = written.len(), out_dir = %out_dir.display(), "artifacts written");
    Ok(written)
}
