//! Global statistics and the analysis summary report.

pub mod global_stats;
pub mod report;

pub use global_stats::{describe, describe_column, DescriptiveStats, MetricSummary};
pub use report::AnalysisSummary;
