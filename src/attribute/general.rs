use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
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
pub enum Lighting {
    #[default]
    Unknown,
    Present,
    Partial,
    Absent,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
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
pub enum Surroundings {
    #[default]
    Unknown,
    Urban,
    Rural,
}

/// The describing part of [`GeneralAttributes`], which may be carried from
/// one edge onto another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Environment {
    pub lighting: Lighting,
    pub surroundings: Surroundings,
}

/// Attributes applying to an entire edge, regardless of side.
///
/// The street name and number identify the edge rather than describe it,
/// so they never make an edge count as attributed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GeneralAttributes {
    pub street_name: Option<String>,
    pub street_number: Option<String>,
    pub lighting: Lighting,
    pub surroundings: Surroundings,
}

impl GeneralAttributes {
    pub fn environment(&self) -> Environment {
        Environment {
            lighting: self.lighting,
            surroundings: self.surroundings,
        }
    }

    /// The same edge identity, described by `environment`.
    pub fn with_environment(&self, environment: Environment) -> Self {
        Self {
            lighting: environment.lighting,
            surroundings: environment.surroundings,
            ..self.clone()
        }
    }

    /// Whether every describing attribute holds its default.
    pub fn is_unset(&self) -> bool {
        self.environment() == Environment::default()
    }
}
