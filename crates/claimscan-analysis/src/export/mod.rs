//! Export adapters: JSON-safe dashboard payloads, CSV tables, and the
//! artifact bundle written by the CLI.

pub mod artifacts;
pub mod dashboard;
pub mod sanitize;
pub mod tables;

pub use artifacts::{Artifact, ArtifactSet};
pub use dashboard::{pick_cost_column, DashboardExport, DashboardSummary, TopGroups};
pub use sanitize::JsonRow;
