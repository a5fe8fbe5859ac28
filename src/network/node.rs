use geo::{Distance, Euclidean, Point};
use petgraph::graph::NodeIndex;
use rstar::{Envelope, AABB};

/// Stable identifier of a node within its [`Network`](crate::network::Network).
pub type NodeId = NodeIndex;

/// A network node, located in a projected (metric) coordinate system.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
}

impl Node {
    pub fn new(position: Point, id: NodeId) -> Self {
        Self { id, position }
    }

    /// Euclidean distance from the node to the point.
    #[inline]
    pub fn distance(&self, point: Point) -> f64 {
        Euclidean.distance(self.position, point)
    }
}

impl rstar::PointDistance for Node {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        Euclidean.distance(self.position, *point).powi(2)
    }
}

impl rstar::RTreeObject for Node {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}
