use crate::attribute::{EdgeAttributes, SourceSystem};

use geo::{Euclidean, Length, LineString};
use petgraph::graph::EdgeIndex;

/// Stable identifier of an edge within its [`Network`](crate::network::Network).
pub type EdgeId = EdgeIndex;

/// A network edge. Its stationing runs from the source to the target node
/// of the graph edge holding it, which is also the direction of its geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub geometry: LineString,
    pub source_system: SourceSystem,
    pub attributes: EdgeAttributes,
}

impl Edge {
    pub fn new(geometry: LineString, source_system: SourceSystem) -> Self {
        Self {
            geometry,
            source_system,
            attributes: EdgeAttributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: EdgeAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Length of the geometry in coordinate units (metres).
    #[inline]
    pub fn length(&self) -> f64 {
        Euclidean.length(&self.geometry)
    }

    /// Whether the edge carries no describing attributes and may therefore
    /// be part of a gap.
    #[inline]
    pub fn is_gap_candidate(&self) -> bool {
        self.attributes.is_attributeless()
    }
}
