use crate::error::GapError;
use crate::gap::path::Gap;
use crate::network::{Network, NodeId};

use geo::{Coord, LineString};
use itertools::Itertools;
use std::io::Write;
use wkt::ToWkt;

/// A gap prepared for manual inspection: its interior as one line, walked
/// from start to end.
#[derive(Debug, Clone, PartialEq)]
pub struct GapExport {
    pub geometry: LineString,
    pub start: NodeId,
    pub end: NodeId,
    /// Comma-joined interior edge ids, in walking order.
    pub edge_ids: String,
}

impl GapExport {
    pub fn from_gap(gap: &Gap, network: &Network) -> Result<Self, GapError> {
        let mut coords: Vec<Coord> = Vec::new();

        for (id, forward) in gap.oriented_edges(network)? {
            let edge = network.edge(id).ok_or(GapError::MissingEdge(id))?;

            let mut walked = edge.geometry.0.clone();
            if !forward {
                walked.reverse();
            }

            // The first coordinate repeats the end of the previous edge.
            let skip = usize::from(!coords.is_empty());
            coords.extend(walked.into_iter().skip(skip));
        }

        Ok(Self {
            geometry: LineString::new(coords),
            start: gap.start,
            end: gap.end,
            edge_ids: gap.edges.iter().map(|edge| edge.index()).join(","),
        })
    }

    /// A tab-separated row of WKT geometry, start node, end node and edges.
    pub fn row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.geometry.wkt_string(),
            self.start.index(),
            self.end.index(),
            self.edge_ids
        )
    }
}

pub const EXPORT_HEADER: &str = "geometry\tstart\tend\tedges";

/// Writes every gap as one row, preceded by [`EXPORT_HEADER`].
pub fn write_gaps<W: Write>(
    writer: &mut W,
    network: &Network,
    gaps: &[Gap],
) -> Result<usize, GapError> {
    writeln!(writer, "{EXPORT_HEADER}")?;

    for gap in gaps {
        writeln!(writer, "{}", GapExport::from_gap(gap, network)?.row())?;
    }

    writer.flush()?;
    Ok(gaps.len())
}
