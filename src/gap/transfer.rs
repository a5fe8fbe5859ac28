use crate::config::MergeConfig;
use crate::error::GapError;
use crate::gap::helper::HelperEdge;
use crate::gap::path::Gap;
use crate::network::{EdgeId, Network, NetworkAdjacency};
use crate::projection::{self, AttributeOverlay, CategoryConflict, Projection};

use log::{debug, trace};

#[cfg(feature = "tracing")]
use tracing::Level;

/// Everything needed to close one gap, collected before any edge is written.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub gap: Gap,
    /// Helper running from the gap's start to its end.
    pub outbound: HelperEdge,
    /// Helper running from the gap's end back to its start.
    pub inbound: HelperEdge,
    /// Interior edges, paired with whether they are stationed from start
    /// towards end.
    pub edges: Vec<(EdgeId, bool)>,
    /// Values of both helpers in start-to-end orientation, restricted to
    /// those both helpers carry.
    shared: [AttributeOverlay; 2],
}

impl TransferPlan {
    pub fn outbound_overlay(&self) -> &AttributeOverlay {
        &self.shared[0]
    }

    pub fn inbound_overlay(&self) -> &AttributeOverlay {
        &self.shared[1]
    }

    /// Whether neither helper has anything to transfer.
    pub fn is_empty(&self) -> bool {
        self.shared.iter().all(AttributeOverlay::is_empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferReport {
    /// Gaps of which at least one interior edge changed.
    pub gaps_closed: usize,
    pub edges_updated: usize,
    pub conflicts: Vec<(EdgeId, CategoryConflict)>,
}

/// Closes gaps by carrying the boundary attributes of each gap onto its
/// interior edges.
pub struct HelperEdgeAttributeTransfer<'a> {
    config: &'a MergeConfig,
}

impl<'a> HelperEdgeAttributeTransfer<'a> {
    pub fn new(config: &'a MergeConfig) -> Self {
        Self { config }
    }

    /// Builds the helper edges of every gap. The network is only read, so
    /// every plan sees the attributes from before the first write.
    pub fn prepare(
        &self,
        network: &Network,
        adjacency: &NetworkAdjacency,
        gaps: &[Gap],
    ) -> Result<Vec<TransferPlan>, GapError> {
        gaps.iter()
            .map(|gap| {
                let outbound =
                    HelperEdge::collect(gap.start, gap.end, network, adjacency, self.config)?;
                let inbound =
                    HelperEdge::collect(gap.end, gap.start, network, adjacency, self.config)?;

                let mut along = outbound.overlay.clone();
                let mut against = inbound.reversed_overlay();
                along.retain_shared(&mut against);

                Ok(TransferPlan {
                    gap: gap.clone(),
                    edges: gap.oriented_edges(network)?,
                    outbound,
                    inbound,
                    shared: [along, against],
                })
            })
            .collect()
    }

    /// Writes the plans onto the interior edges.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all))]
    pub fn apply(
        &self,
        network: &mut Network,
        plans: &[TransferPlan],
    ) -> Result<TransferReport, GapError> {
        let mut report = TransferReport::default();

        for plan in plans {
            if plan.is_empty() {
                trace!(
                    "Nothing shared between the ends of gap {:?} -> {:?}",
                    plan.gap.start, plan.gap.end
                );
                continue;
            }

            let updated = report.edges_updated;
            for &(id, forward) in &plan.edges {
                let edge = network.edge_mut(id).ok_or(GapError::MissingEdge(id))?;

                // Both overlays are in start-to-end orientation.
                let projections = [
                    Projection::full(
                        plan.outbound_overlay().clone(),
                        forward,
                        plan.outbound.source,
                    ),
                    Projection::full(
                        plan.inbound_overlay().clone(),
                        forward,
                        plan.inbound.source,
                    ),
                ];

                let outcome = projection::project(&edge.attributes, &projections, self.config);
                report
                    .conflicts
                    .extend(outcome.conflicts.into_iter().map(|conflict| (id, conflict)));

                // Sidedness has already been re-derived by the projection.
                if outcome.attributes != edge.attributes {
                    edge.attributes = outcome.attributes;
                    report.edges_updated += 1;
                }
            }

            if report.edges_updated > updated {
                report.gaps_closed += 1;
            }
        }

        debug!(
            "Transferred attributes of {} gaps onto {} edges with {} conflicts",
            report.gaps_closed,
            report.edges_updated,
            report.conflicts.len()
        );

        Ok(report)
    }
}
