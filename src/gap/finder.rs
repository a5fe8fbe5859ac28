use crate::config::GapConfig;
use crate::error::GapError;
use crate::gap::path::{Gap, GapPath, Rejection};
use crate::network::{EdgeId, Network, NetworkAdjacency, NodeId};

use log::{debug, trace};
use std::collections::VecDeque;

#[cfg(feature = "tracing")]
use tracing::Level;

/// Bounds applied to every explored branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    pub max_length: f64,
    pub max_edges: usize,
    /// Additional full-network edges a boundary node may carry.
    pub tolerance: usize,
}

impl From<&GapConfig> for SearchLimits {
    fn from(config: &GapConfig) -> Self {
        Self {
            max_length: config.max_length,
            max_edges: config.max_edges,
            tolerance: config.boundary_tolerance,
        }
    }
}

/// Result of searching from one start node.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Accepted(Gap),
    Rejected(Rejection),
    /// Rejected at the start node itself. These are frequent enough that
    /// they are only counted, never reported.
    Unrecorded(Rejection),
}

/// Classification of the node a branch currently ends at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminal {
    DeadEnd,
    Unclear,
    CandidateEnd,
    Interior,
}

/// Branches abandoned during one search, by reason.
#[derive(Debug, Default)]
struct Abandoned {
    dead_ends: usize,
    unclear: usize,
    exhausted: usize,
    too_long: usize,
    too_many_edges: usize,
}

impl Abandoned {
    /// The reason reported when no branch reached a candidate end.
    fn rejection(&self) -> Rejection {
        if self.too_long > 0 {
            Rejection::TooLong
        } else if self.too_many_edges > 0 {
            Rejection::TooManyEdges
        } else if self.dead_ends > 0 && self.unclear == 0 && self.exhausted == 0 {
            Rejection::DeadEnd
        } else if self.unclear > 0 {
            Rejection::UnclearEnd
        } else {
            Rejection::Ambiguous
        }
    }
}

/// Breadth-first search over the gap subgraph for the single gap starting
/// at a boundary node.
pub struct GapPathFinder<'a> {
    network: &'a Network,
    limits: SearchLimits,
}

impl<'a> GapPathFinder<'a> {
    pub fn new(network: &'a Network, limits: SearchLimits) -> Self {
        Self { network, limits }
    }

    /// Classifies a node by its degrees before the run, so the end of an
    /// earlier gap remains a candidate end for the gaps found after it.
    fn classify(
        &self,
        adjacency: &NetworkAdjacency,
        node: NodeId,
    ) -> Result<Terminal, GapError> {
        let full = adjacency.full_degree(node)?;
        let gap = adjacency.initial_gap_degree(node);

        Ok(if full == 1 {
            Terminal::DeadEnd
        } else if full > gap + self.limits.tolerance {
            Terminal::Unclear
        } else if full == gap + 1 {
            Terminal::CandidateEnd
        } else {
            Terminal::Interior
        })
    }

    fn length(&self, edge: EdgeId) -> Result<f64, GapError> {
        self.network
            .edge(edge)
            .map(|edge| edge.length())
            .ok_or(GapError::MissingEdge(edge))
    }

    /// Searches the gap starting at `start`.
    ///
    /// The start node must still be part of the gap subgraph, and be
    /// connected to more than one edge in either graph.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::DEBUG, skip(self, adjacency)))]
    pub fn search(
        &self,
        adjacency: &NetworkAdjacency,
        start: NodeId,
    ) -> Result<SearchOutcome, GapError> {
        let full = adjacency.full_degree(start)?;
        let gap = adjacency.gap_degree(start);

        if gap == 0 || (gap <= 1 && full <= 1) {
            return Err(GapError::Invariant(format!(
                "node {start:?} is no gap boundary (gap degree {gap}, full degree {full})"
            )));
        }

        let initial = adjacency.initial_gap_degree(start);
        if full > initial + self.limits.tolerance {
            trace!("Start {start:?} is touched by {full} edges, only {initial} of them in the gap");
            return Ok(SearchOutcome::Unrecorded(Rejection::UnclearEnd));
        }

        let mut frontier = VecDeque::from([GapPath::new(start)]);
        let mut candidates = Vec::new();
        let mut abandoned = Abandoned::default();

        while let Some(path) = frontier.pop_front() {
            let terminal = path.terminal();

            if !path.is_empty() {
                match self.classify(adjacency, terminal)? {
                    Terminal::DeadEnd => {
                        abandoned.dead_ends += 1;
                        continue;
                    }
                    Terminal::Unclear => {
                        abandoned.unclear += 1;
                        continue;
                    }
                    Terminal::CandidateEnd => {
                        candidates.push(path);
                        continue;
                    }
                    Terminal::Interior => {}
                }
            }

            let mut extended = false;
            for &edge in adjacency.gap_edges(terminal) {
                if path.uses(edge) {
                    continue;
                }

                let (source, target) = self
                    .network
                    .endpoints(edge)
                    .ok_or(GapError::MissingEdge(edge))?;
                let next = if source == terminal { target } else { source };

                if path.visits(next) {
                    continue;
                }

                let branch = path.extended(edge, next, self.length(edge)?);
                extended = true;

                if branch.length > self.limits.max_length {
                    abandoned.too_long += 1;
                } else if branch.edge_count() > self.limits.max_edges {
                    abandoned.too_many_edges += 1;
                } else {
                    frontier.push_back(branch);
                }
            }

            if !extended {
                abandoned.exhausted += 1;
            }
        }

        Ok(match candidates.len() {
            1 => {
                let gap = candidates.remove(0).into_gap();
                debug!(
                    "Found gap {:?} -> {:?} over {} edges ({:.1}m)",
                    gap.start,
                    gap.end,
                    gap.edges.len(),
                    gap.length
                );
                SearchOutcome::Accepted(gap)
            }
            0 => {
                let rejection = abandoned.rejection();
                trace!("No gap from {start:?}, abandoned branches: {abandoned:?}");
                SearchOutcome::Rejected(rejection)
            }
            count => {
                trace!("Gap from {start:?} has {count} possible ends");
                SearchOutcome::Rejected(Rejection::Ambiguous)
            }
        })
    }
}
