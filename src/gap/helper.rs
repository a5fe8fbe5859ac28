use crate::attribute::{AttributeCategory, AttributeEq, EdgeAttributes, Sided, SourceSystem};
use crate::config::MergeConfig;
use crate::error::GapError;
use crate::network::{Network, NetworkAdjacency, NodeId};
use crate::projection::AttributeOverlay;

use itertools::Itertools;
use log::trace;
use radnetz_linear::LinearAttribute;

/// A straight virtual edge between the two ends of a gap, carrying the
/// attributes its start node's attributed edges agree on.
///
/// Helper edges are scratch values of one run. They never enter the network.
#[derive(Debug, Clone, PartialEq)]
pub struct HelperEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Values in the helper's own orientation, `from` towards `to`.
    pub overlay: AttributeOverlay,
    /// The source system shared by all attributed edges at `from`, if any.
    pub source: Option<SourceSystem>,
}

/// The value all `values` agree on, if there is at least one.
fn agreed<'v, V>(mut values: impl Iterator<Item = &'v V>, epsilon: f64) -> Option<V>
where
    V: AttributeEq + Clone + 'v,
{
    let first = values.next()?;
    values
        .all(|value| first.eq_within(value, epsilon))
        .then(|| first.clone())
}

impl HelperEdge {
    /// Collects the helper edge running from `from` to `to`.
    ///
    /// Every attributed edge at `from` is viewed as if travelling into
    /// `from` and continuing along the helper, and contributes the value at
    /// its end touching `from`.
    pub fn collect(
        from: NodeId,
        to: NodeId,
        network: &Network,
        adjacency: &NetworkAdjacency,
        config: &MergeConfig,
    ) -> Result<Self, GapError> {
        let mut boundary: Vec<(EdgeAttributes, SourceSystem)> = Vec::new();

        for &id in adjacency.full_edges(from) {
            let edge = network.edge(id).ok_or(GapError::MissingEdge(id))?;
            if edge.is_gap_candidate() {
                continue;
            }

            let (_, target) = network.endpoints(id).ok_or(GapError::MissingEdge(id))?;
            boundary.push((edge.attributes.oriented(target == from), edge.source_system));
        }

        trace!("Helper {from:?} -> {to:?} collects from {} edges", boundary.len());

        let eps = |category| config.epsilon(category);

        let environments = boundary
            .iter()
            .map(|(attributes, _)| attributes.general.environment())
            .collect::<Vec<_>>();
        let speed = boundary
            .iter()
            .map(|(attributes, _)| LinearAttribute::uniform(*attributes.speed.last()))
            .collect::<Vec<_>>();
        let responsibility = boundary
            .iter()
            .map(|(attributes, _)| LinearAttribute::uniform(*attributes.responsibility.last()))
            .collect::<Vec<_>>();
        let guidance = boundary
            .iter()
            .map(|(attributes, _)| {
                attributes
                    .guidance
                    .as_ref()
                    .map(|guidance| LinearAttribute::uniform(*guidance.last()))
            })
            .collect::<Vec<_>>();

        let overlay = AttributeOverlay {
            general: agreed(environments.iter(), eps(AttributeCategory::General)),
            speed: agreed(speed.iter(), eps(AttributeCategory::Speed)),
            responsibility: agreed(responsibility.iter(), eps(AttributeCategory::Responsibility)),
            guidance: Sided::new(
                agreed(
                    guidance.iter().map(|sided| &sided.left),
                    eps(AttributeCategory::Guidance),
                ),
                agreed(
                    guidance.iter().map(|sided| &sided.right),
                    eps(AttributeCategory::Guidance),
                ),
            ),
            direction: Sided::new(
                agreed(
                    boundary.iter().map(|(attributes, _)| &attributes.direction.left),
                    eps(AttributeCategory::Direction),
                ),
                agreed(
                    boundary.iter().map(|(attributes, _)| &attributes.direction.right),
                    eps(AttributeCategory::Direction),
                ),
            ),
        };

        let source = boundary
            .iter()
            .map(|(_, source)| *source)
            .all_equal_value()
            .ok();

        Ok(Self {
            from,
            to,
            overlay,
            source,
        })
    }

    /// The overlay as seen from the opposite end of the gap.
    pub fn reversed_overlay(&self) -> AttributeOverlay {
        self.overlay.oriented(false)
    }
}
