use crate::network::{EdgeId, NetworkError, NodeId};
use thiserror::Error;

/// Faults aborting a gap-closing run.
///
/// Gaps which cannot be closed are not errors, see [`Rejection`](crate::gap::Rejection).
#[derive(Error, Debug)]
pub enum GapError {
    #[error("Node {0:?} is missing from the network")]
    MissingNode(NodeId),
    #[error("Edge {0:?} is missing from the network")]
    MissingEdge(EdgeId),
    #[error("Invariant violated: {0}")]
    Invariant(String),
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
