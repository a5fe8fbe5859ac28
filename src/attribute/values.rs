use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Posted speed limit class for motorised traffic sharing the edge.
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
pub enum SpeedLimit {
    #[default]
    Unknown,
    UpTo20,
    UpTo30,
    UpTo50,
    UpTo70,
    UpTo100,
    Over100,
}

/// Identifier of an organisation held responsible for part of an edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OrganisationId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Responsibility {
    pub maintenance: Option<OrganisationId>,
    pub construction: Option<OrganisationId>,
    pub administration: Option<OrganisationId>,
}

impl Responsibility {
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
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
pub enum GuidanceForm {
    #[default]
    Unknown,
    BicycleLane,
    ProtectedBicycleLane,
    CycleTrack,
    SharedFootway,
    BicycleStreet,
    MixedTraffic,
    ServiceRoad,
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
pub enum Surface {
    #[default]
    Unknown,
    Asphalt,
    Concrete,
    Paving,
    Gravel,
    Unpaved,
}

/// How cyclists are guided on one side of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Guidance {
    pub form: GuidanceForm,
    pub surface: Surface,
    /// Usable width in metres.
    pub width: Option<f64>,
}

impl Guidance {
    pub fn is_unset(&self) -> bool {
        self.form == GuidanceForm::default()
            && self.surface == Surface::default()
            && self.width.is_none()
    }
}

/// Permitted travel direction, relative to the stationing of the edge.
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
pub enum TravelDirection {
    #[default]
    Both,
    /// Along the stationing direction only.
    Forward,
    /// Against the stationing direction only.
    Backward,
}

impl TravelDirection {
    /// The same direction seen from the opposite stationing.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Both => Self::Both,
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}
