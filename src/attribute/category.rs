use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The attribute categories of an edge. Each category is merged on its own,
/// and may be configured with its own float tolerance and authoritative source.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttributeCategory {
    /// Non-linear, side-agnostic lighting and surroundings. The street name
    /// and number stay with their edge.
    General,
    /// Linear, side-agnostic speed limit.
    Speed,
    /// Linear, side-agnostic maintenance and construction responsibility.
    Responsibility,
    /// Linear, side-dependent guidance form, surface and width.
    Guidance,
    /// Non-linear, side-dependent travel direction.
    Direction,
}

impl AttributeCategory {
    /// Whether the category carries independent left and right values.
    pub fn is_sided(&self) -> bool {
        matches!(self, Self::Guidance | Self::Direction)
    }

    /// Whether the category is referenced along the edge rather than
    /// holding one value for the entire edge.
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Speed | Self::Responsibility | Self::Guidance)
    }
}

/// The system an edge (and therefore its attributes) originates from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    /// Official digital landscape model geometry.
    #[default]
    Dlm,
    /// Edges captured manually by network maintainers.
    Manual,
    /// OpenStreetMap derived edges.
    Osm,
    /// Data delivered by external partners.
    Partner,
}

/// Side of travel, relative to the stationing direction of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}
