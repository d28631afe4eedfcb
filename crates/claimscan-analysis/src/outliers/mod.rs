//! Grouped outlier detection: two fixed rules applied per service-code
//! group.
//!
//! - IQR with Tukey fences (needs ≥ 8 finite values)
//! - Z-score with population std (needs ≥ min group size finite values)
//!
//! Both are one-sided: only values above the fence or threshold are
//! flagged.

pub mod detector;
pub mod iqr;
pub mod quantile;
pub mod types;
pub mod zscore;

pub use detector::{Detection, DetectorSettings, GroupedAnomalyDetector};
pub use types::{
    AnomalyMethod, AnomalyRecord, AnomalySet, Evidence, IqrBounds, MetricGroupStats, ZScoreStats,
};
