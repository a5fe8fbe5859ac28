use crate::attribute::{EdgeAttributes, SourceSystem, SpeedLimit};
use crate::config::NetworkConfig;
use crate::network::{EdgeId, Network, NetworkBuilder};

use geo::LineString;
use radnetz_fixtures::FixtureEdge;
use radnetz_linear::LinearAttribute;
use wkt::TryFromWkt;

pub fn geometry(wkt: &str) -> LineString {
    LineString::try_from_wkt_str(wkt).expect("fixture geometry must be valid WKT")
}

/// Attributes making an edge count as attributed.
pub fn attributed() -> EdgeAttributes {
    EdgeAttributes {
        speed: LinearAttribute::uniform(SpeedLimit::UpTo30),
        ..EdgeAttributes::default()
    }
}

/// Builds the fixture, giving every attributed edge `attributes`. Edge ids
/// are returned in fixture order.
pub fn build_with(fixture: &[FixtureEdge], attributes: &EdgeAttributes) -> (Network, Vec<EdgeId>) {
    let mut builder = NetworkBuilder::new(&NetworkConfig::default());

    let edges = fixture
        .iter()
        .map(|edge| {
            let values = if edge.attributed {
                attributes.clone()
            } else {
                EdgeAttributes::default()
            };

            builder
                .add_with_attributes(geometry(edge.geometry), SourceSystem::Dlm, values)
                .expect("fixture edge must be accepted")
        })
        .collect();

    (builder.build(), edges)
}

pub fn build(fixture: &[FixtureEdge]) -> (Network, Vec<EdgeId>) {
    build_with(fixture, &attributed())
}
