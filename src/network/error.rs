use crate::network::NodeId;
use thiserror::Error;

/// Input which cannot become part of a network.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Geometry needs at least two coordinates")]
    InvalidGeometry,
    #[error("Geometry of length {length} is shorter than the minimum of {minimum}")]
    TooShort { length: f64, minimum: f64 },
    #[error("Edge would connect node {0:?} to itself")]
    SelfLoop(NodeId),
    #[error("Node {0:?} is missing from the network")]
    MissingNode(NodeId),
}
