use crate::network::{Network, Node, NodeId};

use geo::Point;
use log::trace;
use rstar::RTree;

/// Resolves coordinates to network nodes, treating every coordinate within
/// the snapping distance of an existing node as that node.
pub struct SpatialNodeIndex {
    tree: RTree<Node>,
    snapping: f64,
}

impl SpatialNodeIndex {
    pub fn new(snapping: f64) -> Self {
        Self {
            tree: RTree::new(),
            snapping,
        }
    }

    /// Indexes the nodes already present in the network.
    pub fn from_network(network: &Network, snapping: f64) -> Self {
        Self {
            tree: RTree::bulk_load(network.nodes().copied().collect()),
            snapping,
        }
    }

    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// The nearest node, if it lies within the snapping distance.
    pub fn nearest(&self, point: Point) -> Option<&Node> {
        self.tree
            .nearest_neighbor(&point)
            .filter(|node| node.distance(point) <= self.snapping)
    }

    /// Returns the node snapped to by `point`, or creates one at exactly
    /// `point` if there is none.
    pub fn find_or_insert(&mut self, network: &mut Network, point: Point) -> NodeId {
        match self.nearest(point) {
            Some(node) => node.id,
            None => self.insert(network, point),
        }
    }

    /// Creates a node at `point`, regardless of nodes close by.
    pub fn insert(&mut self, network: &mut Network, point: Point) -> NodeId {
        let id = network.add_node(point);
        trace!("Inserted node {id:?} at {point:?}");

        self.tree.insert(Node::new(point, id));
        id
    }
}
