//! The run-scoped network snapshot the gap-closing engine operates on.

pub mod adjacency;
pub mod builder;
pub mod edge;
pub mod error;
pub mod index;
pub mod node;

#[cfg(test)]
mod test;

pub use adjacency::{Adjacency, NetworkAdjacency};
pub use builder::NetworkBuilder;
pub use edge::{Edge, EdgeId};
pub use error::NetworkError;
pub use index::SpatialNodeIndex;
pub use node::{Node, NodeId};

use geo::Point;
use petgraph::graph::DiGraph;
use std::fmt::{Debug, Formatter};

pub type NetworkStructure = DiGraph<Node, Edge>;

/// Nodes and edges of one run, stored in arenas with stable indices.
///
/// Nodes and edges are never removed, so identifiers stay valid for the
/// lifetime of the network.
#[derive(Clone, Default)]
pub struct Network {
    pub(crate) graph: NetworkStructure,
}

impl Debug for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Network with Nodes: {}, Edges: {}",
            self.graph.node_count(),
            self.graph.edge_count()
        )
    }
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, position: Point) -> NodeId {
        let id = self.graph.add_node(Node::new(position, NodeId::end()));
        self.graph[id].id = id;
        id
    }

    /// Adds an edge stationed from `source` to `target`.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge: Edge,
    ) -> Result<EdgeId, NetworkError> {
        if source == target {
            return Err(NetworkError::SelfLoop(source));
        }

        for node in [source, target] {
            if self.graph.node_weight(node).is_none() {
                return Err(NetworkError::MissingNode(node));
            }
        }

        Ok(self.graph.add_edge(source, target, edge))
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node_weight(id)
    }

    #[inline]
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.node(id).map(|node| node.position)
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.graph.edge_weight(id)
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.graph.edge_weight_mut(id)
    }

    /// The `(source, target)` nodes of an edge, in stationing order.
    #[inline]
    pub fn endpoints(&self, id: EdgeId) -> Option<(NodeId, NodeId)> {
        self.graph.edge_endpoints(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> {
        self.graph.edge_indices()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
