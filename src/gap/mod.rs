//! Closing of attribute gaps.
//!
//! A gap is a stretch of attribute-less edges whose ends both meet
//! attributed edges. A run searches gaps from every boundary node, drops
//! gaps which would close a ring or share an end with another gap, and
//! carries the attributes both ends agree on onto the interior edges.

pub mod collision;
pub mod export;
pub mod finder;
pub mod helper;
pub mod path;
pub mod problem;
pub mod statistics;
pub mod transfer;


pub use collision::{Discarded, GapCollisionResolver};
pub use export::{GapExport, write_gaps};
pub use finder::{GapPathFinder, SearchLimits, SearchOutcome};
pub use helper::HelperEdge;
pub use path::{Gap, GapPath, Rejection};
pub use problem::{Problem, ProblemLog, ProblemSink};
pub use statistics::Statistics;
pub use transfer::{HelperEdgeAttributeTransfer, TransferPlan, TransferReport};

use crate::config::GapConfig;
use crate::error::GapError;
use crate::network::{Network, NetworkAdjacency, NodeId};

use log::{debug, info};
use measure_time::debug_time;

#[cfg(feature = "tracing")]
use tracing::Level;

/// Gaps which survived the search, loop check and collision resolution.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub gaps: Vec<Gap>,
    pub adjacency: NetworkAdjacency,
    pub statistics: Statistics,
}

/// Runs gap closing over a network.
pub struct GapCloser {
    config: GapConfig,
}

impl GapCloser {
    pub fn new(config: &GapConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn report(
        network: &Network,
        sink: &mut impl ProblemSink,
        node: NodeId,
        reason: Rejection,
    ) -> Result<(), GapError> {
        let position = network.position(node).ok_or(GapError::MissingNode(node))?;
        sink.record(Problem::new(node, position, reason));
        Ok(())
    }

    /// Finds all gaps which may be closed, without changing the network.
    ///
    /// Every rejected gap is reported to `sink`, except those rejected
    /// outright at their start node for an unclear boundary.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all))]
    pub fn find(
        &self,
        network: &Network,
        sink: &mut impl ProblemSink,
    ) -> Result<Discovery, GapError> {
        debug_time!("gap discovery");

        let mut adjacency = NetworkAdjacency::new(network)?;
        let mut statistics = Statistics {
            candidate_edges: network
                .edge_ids()
                .filter_map(|id| network.edge(id))
                .filter(|edge| edge.is_gap_candidate())
                .count(),
            ..Statistics::default()
        };

        let boundary = adjacency.boundary_nodes();
        statistics.boundary_nodes = boundary.len();
        info!(
            "Searching gaps over {} candidate edges from {} boundary nodes",
            statistics.candidate_edges,
            boundary.len()
        );

        let finder = GapPathFinder::new(network, SearchLimits::from(&self.config));
        let mut gaps = Vec::new();

        for start in boundary {
            // Consumed by a gap found earlier.
            if adjacency.gap_degree(start) == 0 {
                continue;
            }

            match finder.search(&adjacency, start)? {
                SearchOutcome::Accepted(gap) => {
                    for &edge in &gap.edges {
                        adjacency.detach_edge(network, edge)?;
                    }
                    gaps.push(gap);
                }
                SearchOutcome::Rejected(reason) => {
                    statistics.reject(reason);
                    Self::report(network, sink, start, reason)?;
                }
                SearchOutcome::Unrecorded(reason) => statistics.reject(reason),
            }
        }

        statistics.gaps_found = gaps.len();

        let (gaps, loops) = collision::reject_loops(network, &adjacency, gaps)?;
        let (gaps, collisions) = GapCollisionResolver.resolve(gaps);

        for discarded in loops.into_iter().chain(collisions) {
            statistics.reject(discarded.reason);
            Self::report(network, sink, discarded.node, discarded.reason)?;
        }

        info!(
            "Found {} gaps, {} of them can be closed",
            statistics.gaps_found,
            gaps.len()
        );

        Ok(Discovery {
            gaps,
            adjacency,
            statistics,
        })
    }

    /// Writes the attributes of the discovered gaps onto their interior edges.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all))]
    pub fn close(
        &self,
        network: &mut Network,
        discovery: Discovery,
    ) -> Result<Statistics, GapError> {
        debug_time!("gap closing");

        let Discovery {
            gaps,
            adjacency,
            mut statistics,
        } = discovery;

        let transfer = HelperEdgeAttributeTransfer::new(&self.config.merge);
        let plans = transfer.prepare(network, &adjacency, &gaps)?;
        let report = transfer.apply(network, &plans)?;

        statistics.gaps_closed = report.gaps_closed;
        statistics.edges_updated = report.edges_updated;
        statistics.conflicts = report.conflicts.len();

        for (edge, conflict) in &report.conflicts {
            debug!(
                "Conflict on edge {edge:?} in {} ({:?}) over [{:.3}, {:.3}]",
                conflict.category,
                conflict.side,
                conflict.interval.from(),
                conflict.interval.to()
            );
        }

        info!(
            "Closed {} of {} gaps",
            statistics.gaps_closed,
            plans.len()
        );
        Ok(statistics)
    }

    /// Finds and closes all gaps of the network.
    pub fn run(
        &self,
        network: &mut Network,
        sink: &mut impl ProblemSink,
    ) -> Result<Statistics, GapError> {
        let discovery = self.find(network, sink)?;
        self.close(network, discovery)
    }
}
