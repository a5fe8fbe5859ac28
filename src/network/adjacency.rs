use crate::error::GapError;
use crate::network::{Edge, EdgeId, Network, NodeId};

use log::trace;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub type IncidentEdges = SmallVec<[EdgeId; 4]>;

/// Incident edges per node, restricted to the edges accepted by a filter.
///
/// Every edge is listed once at each of its two endpoints. A node only
/// appears once it has at least one incident edge, so a present node
/// always has a degree of at least one.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    incident: FxHashMap<NodeId, IncidentEdges>,
}

impl Adjacency {
    /// Builds the adjacency of all edges for which `include` holds.
    pub fn build(network: &Network, include: impl Fn(&Edge) -> bool) -> Result<Self, GapError> {
        let mut incident: FxHashMap<NodeId, IncidentEdges> = FxHashMap::default();

        for id in network.edge_ids() {
            let edge = network.edge(id).ok_or(GapError::MissingEdge(id))?;
            if !include(edge) {
                continue;
            }

            let (source, target) = network.endpoints(id).ok_or(GapError::MissingEdge(id))?;
            if source == target {
                return Err(GapError::Invariant(format!(
                    "edge {id:?} references node {source:?} at both ends"
                )));
            }

            incident.entry(source).or_default().push(id);
            incident.entry(target).or_default().push(id);
        }

        Ok(Self { incident })
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.incident.get(&node).map_or(0, |edges| edges.len())
    }

    #[inline]
    pub fn edges(&self, node: NodeId) -> &[EdgeId] {
        self.incident
            .get(&node)
            .map_or(&[], |edges| edges.as_slice())
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.incident.contains_key(&node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.incident.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.incident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incident.is_empty()
    }

    /// Removes the edge from the lists of `nodes`, dropping nodes left
    /// without any edge. Returns whether the edge was listed at all.
    fn remove(&mut self, edge: EdgeId, nodes: [NodeId; 2]) -> bool {
        let mut removed = false;

        for node in nodes {
            let Some(edges) = self.incident.get_mut(&node) else {
                continue;
            };

            if let Some(position) = edges.iter().position(|candidate| *candidate == edge) {
                edges.remove(position);
                removed = true;
            }

            if edges.is_empty() {
                trace!("Node {node:?} has no remaining edges");
                self.incident.remove(&node);
            }
        }

        removed
    }
}

/// The two adjacency views of a run: the gap subgraph of attribute-less
/// edges, and the full network.
///
/// Only the gap subgraph changes during a run, through [`NetworkAdjacency::detach_edge`].
/// The gap degree every node had before that is kept alongside, since
/// whether a node bounds a gap does not change when a gap is found.
#[derive(Debug, Clone)]
pub struct NetworkAdjacency {
    gap: Adjacency,
    full: Adjacency,
    initial: FxHashMap<NodeId, usize>,
}

impl NetworkAdjacency {
    pub fn new(network: &Network) -> Result<Self, GapError> {
        let gap = Self::build_gap_subgraph(network)?;
        let initial = gap.nodes().map(|node| (node, gap.degree(node))).collect();

        Ok(Self {
            gap,
            full: Self::build_full_graph(network)?,
            initial,
        })
    }

    pub fn build_gap_subgraph(network: &Network) -> Result<Adjacency, GapError> {
        Adjacency::build(network, Edge::is_gap_candidate)
    }

    pub fn build_full_graph(network: &Network) -> Result<Adjacency, GapError> {
        Adjacency::build(network, |_| true)
    }

    pub fn gap(&self) -> &Adjacency {
        &self.gap
    }

    /// Degree of the node within the remaining gap subgraph.
    #[inline]
    pub fn gap_degree(&self, node: NodeId) -> usize {
        self.gap.degree(node)
    }

    /// Degree of the node within the gap subgraph before any edge was detached.
    #[inline]
    pub fn initial_gap_degree(&self, node: NodeId) -> usize {
        self.initial.get(&node).copied().unwrap_or_default()
    }

    /// Degree of the node within the full network.
    ///
    /// Every node of the gap subgraph is part of the full network, so a
    /// node without full degree means the bookkeeping is broken.
    pub fn full_degree(&self, node: NodeId) -> Result<usize, GapError> {
        match self.full.degree(node) {
            0 => Err(GapError::Invariant(format!(
                "node {node:?} has no degree in the full network"
            ))),
            degree => Ok(degree),
        }
    }

    #[inline]
    pub fn gap_edges(&self, node: NodeId) -> &[EdgeId] {
        self.gap.edges(node)
    }

    #[inline]
    pub fn full_edges(&self, node: NodeId) -> &[EdgeId] {
        self.full.edges(node)
    }

    /// Removes the edge from the gap subgraph at both of its endpoints.
    pub fn detach_edge(&mut self, network: &Network, edge: EdgeId) -> Result<(), GapError> {
        let (source, target) = network.endpoints(edge).ok_or(GapError::MissingEdge(edge))?;

        if !self.gap.remove(edge, [source, target]) {
            trace!("Edge {edge:?} was already detached");
        }

        Ok(())
    }

    /// Nodes where the gap subgraph meets attributed edges, in ascending
    /// order so runs over the same network are reproducible.
    pub fn boundary_nodes(&self) -> Vec<NodeId> {
        let mut nodes = self
            .gap
            .nodes()
            .filter(|node| self.full.degree(*node) > self.gap.degree(*node))
            .collect::<Vec<_>>();

        nodes.sort_unstable();
        nodes
    }
}
