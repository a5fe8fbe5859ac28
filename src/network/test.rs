use crate::attribute::SourceSystem;
use crate::config::NetworkConfig;
use crate::error::GapError;
use crate::network::{
    Edge, Network, NetworkAdjacency, NetworkBuilder, NetworkError, NodeId, SpatialNodeIndex,
};
use crate::testing::{self, geometry};

use approx::assert_relative_eq;
use geo::{LineString, Point, point};
use radnetz_fixtures::LINEAR_GAP;

fn builder() -> NetworkBuilder {
    NetworkBuilder::new(&NetworkConfig::default())
}

#[test_log::test]
fn snaps_close_endpoints_onto_one_node() {
    let mut builder = builder();

    let first = builder
        .add(geometry("LINESTRING(0 0, 100 0)"), SourceSystem::Dlm)
        .expect("must be accepted");
    let second = builder
        .add(geometry("LINESTRING(100.3 0.1, 200 0)"), SourceSystem::Osm)
        .expect("must be accepted");

    let network = builder.build();
    assert_eq!(network.node_count(), 3);

    let (_, shared) = network.endpoints(first).expect("edge exists");
    let (start, _) = network.endpoints(second).expect("edge exists");
    assert_eq!(shared, start);

    // The node keeps the coordinate it was first created at.
    let position = network.position(shared).expect("node exists");
    assert_relative_eq!(position.x(), 100.0);
    assert_relative_eq!(position.y(), 0.0);
}

#[test]
fn keeps_distant_endpoints_apart() {
    let mut builder = builder();
    builder
        .add(geometry("LINESTRING(0 0, 100 0)"), SourceSystem::Dlm)
        .expect("must be accepted");
    builder
        .add(geometry("LINESTRING(101 0, 200 0)"), SourceSystem::Dlm)
        .expect("must be accepted");

    assert_eq!(builder.build().node_count(), 4);
}

#[test]
fn rejects_short_and_degenerate_geometry() {
    let mut builder = builder();

    assert!(matches!(
        builder.add(geometry("LINESTRING(0 0, 0.5 0)"), SourceSystem::Dlm),
        Err(NetworkError::TooShort { .. })
    ));

    assert_eq!(
        builder.add(LineString::new(vec![]), SourceSystem::Dlm),
        Err(NetworkError::InvalidGeometry)
    );

    assert_eq!(builder.network().node_count(), 0);
}

#[test_log::test]
fn splits_endpoints_snapping_to_the_same_node() {
    let mut builder = builder();
    builder
        .add(geometry("LINESTRING(0 0, 100 0)"), SourceSystem::Dlm)
        .expect("must be accepted");

    // Both ends lie within snapping distance of the node at the origin.
    let id = builder
        .add(geometry("LINESTRING(0.1 0, 0 50, 0.3 0)"), SourceSystem::Dlm)
        .expect("must be accepted");

    let network = builder.build();
    assert_eq!(network.node_count(), 3);

    let (source, target) = network.endpoints(id).expect("edge exists");
    assert_ne!(source, target);
    assert_eq!(source, NodeId::new(0));

    let created = network.position(target).expect("node exists");
    assert_relative_eq!(created.x(), 0.3);
}

#[test]
fn refuses_self_loops() {
    let mut network = Network::new();
    let node = network.add_node(point!(x: 0.0, y: 0.0));

    let edge = Edge::new(geometry("LINESTRING(0 0, 10 10, 0 0)"), SourceSystem::Dlm);
    assert_eq!(
        network.add_edge(node, node, edge),
        Err(NetworkError::SelfLoop(node))
    );
}

#[test]
fn nearest_respects_the_snapping_distance() {
    let mut network = Network::new();
    let mut index = SpatialNodeIndex::new(0.5);

    let node = index.find_or_insert(&mut network, Point::new(10.0, 10.0));
    assert_eq!(index.find_or_insert(&mut network, Point::new(10.4, 10.0)), node);

    assert!(index.nearest(Point::new(11.0, 10.0)).is_none());
    assert_eq!(index.size(), 1);

    let inserted = index.insert(&mut network, Point::new(10.2, 10.0));
    assert_ne!(inserted, node);
    assert_eq!(network.node_count(), 2);
}

#[test_log::test]
fn adjacency_separates_gap_and_full_degree() {
    let (network, _) = testing::build(LINEAR_GAP);
    let adjacency = NetworkAdjacency::new(&network).expect("valid network");

    // X, A, B, C, Y in creation order.
    let [x, a, b, c, y] = [0, 1, 2, 3, 4].map(NodeId::new);

    assert_eq!(adjacency.gap_degree(x), 0);
    assert_eq!(adjacency.gap_degree(a), 1);
    assert_eq!(adjacency.gap_degree(b), 2);
    assert_eq!(adjacency.gap_degree(c), 1);
    assert_eq!(adjacency.gap_degree(y), 0);

    for node in [a, b, c] {
        assert_eq!(adjacency.full_degree(node).expect("node is present"), 2);
    }
    assert_eq!(adjacency.full_degree(x).expect("node is present"), 1);

    assert_eq!(adjacency.boundary_nodes(), vec![a, c]);
}

#[test]
fn detaching_drops_emptied_nodes() {
    let (network, edges) = testing::build(LINEAR_GAP);
    let mut adjacency = NetworkAdjacency::new(&network).expect("valid network");
    let [a, b] = [1, 2].map(NodeId::new);

    adjacency
        .detach_edge(&network, edges[1])
        .expect("edge exists");

    assert!(!adjacency.gap().contains(a));
    assert_eq!(adjacency.gap_degree(b), 1);
    assert_eq!(adjacency.gap_edges(b), &[edges[2]]);

    // The full network and the degrees before detaching are unaffected.
    assert_eq!(adjacency.full_degree(a).expect("node is present"), 2);
    assert_eq!(adjacency.initial_gap_degree(a), 1);
    assert_eq!(adjacency.initial_gap_degree(b), 2);

    // Detaching twice changes nothing.
    adjacency
        .detach_edge(&network, edges[1])
        .expect("edge exists");
    assert_eq!(adjacency.gap_degree(b), 1);
}

#[test]
fn missing_full_degree_is_an_invariant_violation() {
    let (network, _) = testing::build(LINEAR_GAP);
    let adjacency = NetworkAdjacency::new(&network).expect("valid network");

    assert!(matches!(
        adjacency.full_degree(NodeId::new(99)),
        Err(GapError::Invariant(_))
    ));
}

#[test]
fn extending_a_network_snaps_onto_its_nodes() {
    let (network, _) = testing::build(LINEAR_GAP);
    let mut builder = NetworkBuilder::extend(network, &NetworkConfig::default());

    let id = builder
        .add(geometry("LINESTRING(200.2 0, 200 100)"), SourceSystem::Osm)
        .expect("must be accepted");

    let network = builder.build();
    assert_eq!(network.node_count(), 6);

    let (start, _) = network.endpoints(id).expect("edge exists");
    assert_eq!(start, NodeId::new(2));
}
