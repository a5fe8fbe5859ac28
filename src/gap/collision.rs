use crate::error::GapError;
use crate::gap::path::{Gap, Rejection};
use crate::network::{Network, NetworkAdjacency, NodeId};

use log::debug;
use rustc_hash::FxHashMap;

/// A gap removed after it was found, and the node it is reported at.
#[derive(Debug, Clone, PartialEq)]
pub struct Discarded {
    pub gap: Gap,
    pub reason: Rejection,
    pub node: NodeId,
}

/// Rejects gaps whose start and end are both touched by the same attributed
/// edge, since closing them would close a ring.
pub fn reject_loops(
    network: &Network,
    adjacency: &NetworkAdjacency,
    gaps: Vec<Gap>,
) -> Result<(Vec<Gap>, Vec<Discarded>), GapError> {
    let mut kept = Vec::with_capacity(gaps.len());
    let mut discarded = Vec::new();

    for gap in gaps {
        let end_edges = adjacency.full_edges(gap.end);
        let mut closing = None;

        for &edge in adjacency.full_edges(gap.start) {
            let candidate = network.edge(edge).ok_or(GapError::MissingEdge(edge))?;
            if !candidate.is_gap_candidate() && end_edges.contains(&edge) {
                closing = Some(edge);
                break;
            }
        }

        match closing {
            Some(edge) => {
                debug!(
                    "Gap {:?} -> {:?} is closed into a ring by edge {edge:?}",
                    gap.start, gap.end
                );
                discarded.push(Discarded {
                    node: gap.start,
                    gap,
                    reason: Rejection::SelfLoop,
                });
            }
            None => kept.push(gap),
        }
    }

    Ok((kept, discarded))
}

/// Removes every gap sharing an end node with another gap.
///
/// All gaps at such a node are removed, not only the surplus ones, since
/// neither can be trusted to describe the boundary. Applying the resolver
/// to its own output changes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct GapCollisionResolver;

impl GapCollisionResolver {
    pub fn resolve(&self, gaps: Vec<Gap>) -> (Vec<Gap>, Vec<Discarded>) {
        let mut usage: FxHashMap<NodeId, usize> = FxHashMap::default();
        for node in gaps.iter().flat_map(Gap::endpoints) {
            *usage.entry(node).or_default() += 1;
        }

        let shared = |node: &NodeId| usage.get(node).is_some_and(|count| *count > 1);

        let (kept, colliding): (Vec<_>, Vec<_>) = gaps
            .into_iter()
            .partition(|gap| !gap.endpoints().iter().any(shared));

        let discarded = colliding
            .into_iter()
            .map(|gap| {
                let node = if shared(&gap.start) { gap.start } else { gap.end };
                debug!(
                    "Gap {:?} -> {:?} collides with another gap at {node:?}",
                    gap.start, gap.end
                );

                Discarded {
                    gap,
                    reason: Rejection::Collision,
                    node,
                }
            })
            .collect();

        (kept, discarded)
    }
}
