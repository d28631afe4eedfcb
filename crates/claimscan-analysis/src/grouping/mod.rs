//! Grouping: partition by service code, then apply the size guard.

pub mod eligibility;
pub mod partition;

pub use eligibility::{Eligible, EligibilityFilter};
pub use partition::{Group, GroupPartition};
