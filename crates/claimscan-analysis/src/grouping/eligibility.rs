//! Minimum-group-size guard.

use super::partition::{Group, GroupPartition};

/// Keeps groups with at least `min_group_size` records.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityFilter {
    pub min_group_size: usize,
}

/// Eligible groups in partition order, plus the count skipped.
#[derive(Debug, Clone)]
pub struct Eligible<'a> {
    pub groups: Vec<&'a Group>,
    pub skipped: usize,
}

impl EligibilityFilter {
    pub fn new(min_group_size: usize) -> Self {
        Self { min_group_size }
    }

    pub fn is_eligible(&self, size: usize) -> bool {
        size >= self.min_group_size
    }

    pub fn apply<'a>(&self, partition: &'a GroupPartition) -> Eligible<'a> {
        let groups: Vec<&Group> = partition
            .groups()
            .iter()
            .filter(|g| self.is_eligible(g.size()))
            .collect();
        let skipped = partition.len() - groups.len();
        Eligible { groups, skipped }
    }
}
