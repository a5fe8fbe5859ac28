use crate::gap::path::Rejection;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Counters of one gap-closing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Attribute-less edges considered.
    pub candidate_edges: usize,
    /// Nodes the search started from.
    pub boundary_nodes: usize,
    /// Gaps accepted by the search, before loops and collisions were removed.
    pub gaps_found: usize,
    pub rejected: BTreeMap<Rejection, usize>,
    pub gaps_closed: usize,
    pub edges_updated: usize,
    pub conflicts: usize,
}

impl Statistics {
    pub fn reject(&mut self, reason: Rejection) {
        *self.rejected.entry(reason).or_default() += 1;
    }

    pub fn rejected(&self, reason: Rejection) -> usize {
        self.rejected.get(&reason).copied().unwrap_or_default()
    }

    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Candidate edges: {}", self.candidate_edges)?;
        writeln!(f, "Boundary nodes: {}", self.boundary_nodes)?;
        writeln!(f, "Gaps found: {}", self.gaps_found)?;
        for (reason, count) in &self.rejected {
            writeln!(f, "Rejected ({reason}): {count}")?;
        }
        writeln!(f, "Gaps closed: {}", self.gaps_closed)?;
        writeln!(f, "Edges updated: {}", self.edges_updated)?;
        write!(f, "Merge conflicts: {}", self.conflicts)
    }
}
