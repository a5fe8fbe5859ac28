use crate::attribute::{EdgeAttributes, SourceSystem};
use crate::config::NetworkConfig;
use crate::network::{Edge, EdgeId, Network, NetworkError, NodeId, SpatialNodeIndex};

use geo::{Euclidean, Length, LineString, Point};
use log::debug;

/// Assembles a [`Network`] from line geometries, resolving their endpoints
/// to shared nodes through a [`SpatialNodeIndex`].
pub struct NetworkBuilder {
    network: Network,
    index: SpatialNodeIndex,
    min_length: f64,
}

impl NetworkBuilder {
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            network: Network::new(),
            index: SpatialNodeIndex::new(config.snapping_distance),
            min_length: config.min_edge_length,
        }
    }

    /// Continues building upon an existing network.
    pub fn extend(network: Network, config: &NetworkConfig) -> Self {
        Self {
            index: SpatialNodeIndex::from_network(&network, config.snapping_distance),
            network,
            min_length: config.min_edge_length,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Adds the geometry as an edge without attributes.
    pub fn add(
        &mut self,
        geometry: LineString,
        source_system: SourceSystem,
    ) -> Result<EdgeId, NetworkError> {
        self.add_with_attributes(geometry, source_system, EdgeAttributes::default())
    }

    pub fn add_with_attributes(
        &mut self,
        geometry: LineString,
        source_system: SourceSystem,
        attributes: EdgeAttributes,
    ) -> Result<EdgeId, NetworkError> {
        let (start, end) = match (geometry.0.first(), geometry.0.last()) {
            (Some(start), Some(end)) if geometry.0.len() >= 2 => (Point(*start), Point(*end)),
            _ => return Err(NetworkError::InvalidGeometry),
        };

        let length = Euclidean.length(&geometry);
        if length < self.min_length {
            return Err(NetworkError::TooShort {
                length,
                minimum: self.min_length,
            });
        }

        let (source, target) = self.resolve_endpoints(start, end);

        let edge = Edge::new(geometry, source_system).with_attributes(attributes);
        self.network.add_edge(source, target, edge)
    }

    /// Resolves both endpoints to nodes without ever producing a self-loop.
    ///
    /// Should both endpoints snap to the same existing node, the endpoint
    /// closer to it keeps the node and the other one receives a new node.
    fn resolve_endpoints(&mut self, start: Point, end: Point) -> (NodeId, NodeId) {
        let nearest_start = self.index.nearest(start).copied();
        let nearest_end = self.index.nearest(end).copied();

        match (nearest_start, nearest_end) {
            (Some(node), Some(other)) if node.id == other.id => {
                debug!(
                    "Both endpoints snap to node {:?}, splitting onto a new node",
                    node.id
                );

                if node.distance(start) <= node.distance(end) {
                    (node.id, self.index.insert(&mut self.network, end))
                } else {
                    (self.index.insert(&mut self.network, start), node.id)
                }
            }
            _ => {
                let source = self.index.find_or_insert(&mut self.network, start);
                let target = match self.index.find_or_insert(&mut self.network, end) {
                    // The start node was just created within reach of the end.
                    target if target == source => self.index.insert(&mut self.network, end),
                    target => target,
                };

                (source, target)
            }
        }
    }

    pub fn build(self) -> Network {
        debug!(
            "Built network of {} nodes and {} edges",
            self.network.node_count(),
            self.network.edge_count()
        );
        self.network
    }
}
