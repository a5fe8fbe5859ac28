use crate::attribute::{AttributeCategory, SourceSystem};
use crate::error::GapError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Float tolerance for categories without a configured epsilon.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Settings of a gap-closing run.
///
/// ```toml
/// max_length = 500.0
/// max_edges = 10
///
/// [network]
/// snapping_distance = 0.5
///
/// [merge.authority]
/// guidance = "manual"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    /// Upper bound for the accumulated length of a gap, in metres.
    pub max_length: f64,
    /// Upper bound for the number of edges within a gap.
    pub max_edges: usize,
    /// How many more edges a boundary node may have in the full network
    /// than in the gap subgraph before it counts as an unclear end.
    pub boundary_tolerance: usize,
    pub network: NetworkConfig,
    pub merge: MergeConfig,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            max_length: 500.0,
            max_edges: 10,
            boundary_tolerance: 1,
            network: NetworkConfig::default(),
            merge: MergeConfig::default(),
        }
    }
}

impl GapConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, GapError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GapError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Settings used when edges are added to a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Endpoints closer than this, in metres, share one node.
    pub snapping_distance: f64,
    /// Geometries shorter than this, in metres, are rejected.
    pub min_edge_length: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            snapping_distance: 0.5,
            min_edge_length: 1.0,
        }
    }
}

/// Settings of the linear attribute merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Overlay boundaries closer than this fraction of the target edge are
    /// moved onto their common midpoint.
    pub tolerance: f64,
    /// Float tolerance per category when comparing values.
    pub epsilon: BTreeMap<AttributeCategory, f64>,
    /// Source system whose values win conflicts, per category.
    pub authority: BTreeMap<AttributeCategory, SourceSystem>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            epsilon: BTreeMap::from([(AttributeCategory::Guidance, 0.05)]),
            authority: BTreeMap::new(),
        }
    }
}

impl MergeConfig {
    pub fn epsilon(&self, category: AttributeCategory) -> f64 {
        self.epsilon
            .get(&category)
            .copied()
            .unwrap_or(DEFAULT_EPSILON)
    }

    pub fn authority(&self, category: AttributeCategory) -> Option<SourceSystem> {
        self.authority.get(&category).copied()
    }
}
