use crate::error::GapError;
use crate::network::{EdgeId, Network, NodeId};

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Why a gap was not closed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Every branch ran into the end of the network.
    DeadEnd,
    /// Several candidate ends were found, or none for any other reason.
    Ambiguous,
    /// A boundary is touched by too many attributed edges.
    UnclearEnd,
    /// Every branch exceeded the maximum length.
    TooLong,
    /// Every branch exceeded the maximum number of edges.
    TooManyEdges,
    /// The gap shares an end with another gap.
    Collision,
    /// The ends of the gap are joined by an attributed edge.
    SelfLoop,
}

impl Rejection {
    pub fn description(&self) -> &'static str {
        match self {
            Self::DeadEnd => "Gap search only reached dead ends",
            Self::Ambiguous => "Gap search found no unique end node",
            Self::UnclearEnd => "Gap boundary is touched by too many attributed edges",
            Self::TooLong => "Gap exceeds the maximum length",
            Self::TooManyEdges => "Gap exceeds the maximum number of edges",
            Self::Collision => "Gap shares an end node with another gap",
            Self::SelfLoop => "Gap ends are joined by an attributed edge",
        }
    }
}

/// A partial path explored by the gap search.
///
/// Paths are owned values, extending one produces a new path and leaves
/// the original untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct GapPath {
    pub start: NodeId,
    pub edges: SmallVec<[EdgeId; 8]>,
    /// Visited nodes, starting with `start` and ending with the terminal.
    pub nodes: SmallVec<[NodeId; 8]>,
    pub length: f64,
}

impl GapPath {
    pub fn new(start: NodeId) -> Self {
        Self {
            start,
            edges: SmallVec::new(),
            nodes: smallvec![start],
            length: 0.0,
        }
    }

    /// The node the path currently ends at.
    #[inline]
    pub fn terminal(&self) -> NodeId {
        self.nodes.last().copied().unwrap_or(self.start)
    }

    #[inline]
    pub fn visits(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    #[inline]
    pub fn uses(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn extended(&self, edge: EdgeId, node: NodeId, length: f64) -> Self {
        let mut path = self.clone();
        path.edges.push(edge);
        path.nodes.push(node);
        path.length += length;
        path
    }

    pub fn into_gap(self) -> Gap {
        Gap {
            start: self.start,
            end: self.terminal(),
            edges: self.edges.into_vec(),
            length: self.length,
        }
    }
}

/// An accepted stretch of attribute-less edges between two distinct
/// boundary nodes. `edges` are ordered from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gap {
    pub start: NodeId,
    pub end: NodeId,
    pub edges: Vec<EdgeId>,
    pub length: f64,
}

impl Gap {
    #[inline]
    pub fn endpoints(&self) -> [NodeId; 2] {
        [self.start, self.end]
    }

    /// Walks the gap from its start, pairing every edge with whether its
    /// stationing runs along the walking direction.
    pub fn oriented_edges(&self, network: &Network) -> Result<Vec<(EdgeId, bool)>, GapError> {
        let mut position = self.start;

        self.edges
            .iter()
            .map(|&edge| {
                let (from, to) = network.endpoints(edge).ok_or(GapError::MissingEdge(edge))?;

                let forward = if from == position {
                    true
                } else if to == position {
                    false
                } else {
                    return Err(GapError::Invariant(format!(
                        "edge {edge:?} of gap {:?} -> {:?} does not continue at {position:?}",
                        self.start, self.end
                    )));
                };

                position = if forward { to } else { from };
                Ok((edge, forward))
            })
            .collect()
    }
}
