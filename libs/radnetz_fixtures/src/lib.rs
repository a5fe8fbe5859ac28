//! Small networks in a metric coordinate system, used by tests and benches.
//!
//! Every edge is given as a WKT line string, stationed from its first to its
//! last coordinate, along with whether it carries attributes. Attribute-less
//! edges form the gap subgraph.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureEdge {
    pub geometry: &'static str,
    pub attributed: bool,
}

const fn real(geometry: &'static str) -> FixtureEdge {
    FixtureEdge {
        geometry,
        attributed: true,
    }
}

const fn gap(geometry: &'static str) -> FixtureEdge {
    FixtureEdge {
        geometry,
        attributed: false,
    }
}

/// `X - A - B - C - Y`, where only `A - B` and `B - C` lack attributes.
pub const LINEAR_GAP: &[FixtureEdge] = &[
    real("LINESTRING(0 0, 100 0)"),
    gap("LINESTRING(100 0, 150 10, 200 0)"),
    gap("LINESTRING(200 0, 300 0)"),
    real("LINESTRING(300 0, 400 0)"),
];

/// As [`LINEAR_GAP`], with `B - C` stationed against the walking direction.
pub const REVERSED_GAP: &[FixtureEdge] = &[
    real("LINESTRING(0 0, 100 0)"),
    gap("LINESTRING(100 0, 150 10, 200 0)"),
    gap("LINESTRING(300 0, 200 0)"),
    real("LINESTRING(300 0, 400 0)"),
];

/// `X - A - B - C` where `C` ends the network.
pub const DEAD_END: &[FixtureEdge] = &[
    real("LINESTRING(0 0, 100 0)"),
    gap("LINESTRING(100 0, 200 0)"),
    gap("LINESTRING(200 0, 300 0)"),
];

/// `A - B` forks into `B - C` and `B - D`, all three ends attributed.
pub const FORK: &[FixtureEdge] = &[
    real("LINESTRING(0 0, 100 0)"),
    gap("LINESTRING(100 0, 200 0)"),
    gap("LINESTRING(200 0, 300 50)"),
    gap("LINESTRING(200 0, 300 -50)"),
    real("LINESTRING(300 50, 400 50)"),
    real("LINESTRING(300 -50, 400 -50)"),
];

/// A gap `A - B - C` whose ends are also joined by the attributed edge `A - C`.
pub const LOOP: &[FixtureEdge] = &[
    real("LINESTRING(0 0, 200 0)"),
    gap("LINESTRING(0 0, 100 100)"),
    gap("LINESTRING(100 100, 200 0)"),
];

/// A gap of two edges adding up to 600 metres.
pub const LONG_GAP: &[FixtureEdge] = &[
    real("LINESTRING(0 0, 100 0)"),
    gap("LINESTRING(100 0, 400 0)"),
    gap("LINESTRING(400 0, 700 0)"),
    real("LINESTRING(700 0, 800 0)"),
];

/// A gap starting at `A`, a junction of three attributed edges.
pub const CROWDED_START: &[FixtureEdge] = &[
    real("LINESTRING(0 0, 100 0)"),
    real("LINESTRING(100 100, 100 0)"),
    real("LINESTRING(100 -100, 100 0)"),
    gap("LINESTRING(100 0, 200 0)"),
    real("LINESTRING(200 0, 300 0)"),
];

/// Two gaps which both end at `N` (`200 0`), reached from `A` (`0 0`) and
/// from `B` (`400 0`).
pub const SHARED_END: &[FixtureEdge] = &[
    real("LINESTRING(-100 0, 0 0)"),
    gap("LINESTRING(0 0, 100 0)"),
    gap("LINESTRING(100 0, 200 0)"),
    real("LINESTRING(200 0, 200 -100)"),
    gap("LINESTRING(400 0, 300 0)"),
    gap("LINESTRING(300 0, 200 0)"),
    real("LINESTRING(400 0, 500 0)"),
];
