//! Projection of attributes from several source edges onto one target edge.
//!
//! Each source covers a sub-interval of the target and runs either along or
//! against the target's stationing. Sources are brought into the target's
//! orientation, squeezed into the interval they cover, and merged into the
//! target category by category.

#[cfg(test)]
mod test;

use crate::attribute::{
    AttributeCategory, AttributeEq, EdgeAttributes, Environment, Guidance, Responsibility, Side,
    Sided, SourceSystem, SpeedLimit, TravelDirection,
};
use crate::config::MergeConfig;

use log::trace;
use radnetz_linear::{Interval, LinearAttribute, Merger, Overlay, Resolution, Segment};

/// Attribute values offered by a source, per category. A category without
/// a value leaves the target untouched.
///
/// Street names and numbers belong to the target and are never offered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeOverlay {
    pub general: Option<Environment>,
    pub speed: Option<LinearAttribute<SpeedLimit>>,
    pub responsibility: Option<LinearAttribute<Responsibility>>,
    pub guidance: Sided<Option<LinearAttribute<Guidance>>>,
    pub direction: Sided<Option<TravelDirection>>,
}

impl From<&EdgeAttributes> for AttributeOverlay {
    fn from(attributes: &EdgeAttributes) -> Self {
        Self {
            general: Some(attributes.general.environment()),
            speed: Some(attributes.speed.clone()),
            responsibility: Some(attributes.responsibility.clone()),
            guidance: attributes.guidance.clone().map(Some),
            direction: attributes.direction.map(Some),
        }
    }
}

impl AttributeOverlay {
    /// Views the overlay along (`forward`) or against the stationing it is
    /// given in, see [`EdgeAttributes::oriented`].
    pub fn oriented(&self, forward: bool) -> Self {
        if forward {
            return self.clone();
        }

        Self {
            general: self.general,
            speed: self.speed.as_ref().map(LinearAttribute::reversed),
            responsibility: self.responsibility.as_ref().map(LinearAttribute::reversed),
            guidance: self
                .guidance
                .as_ref()
                .map(|guidance| guidance.as_ref().map(LinearAttribute::reversed))
                .swapped(),
            direction: self
                .direction
                .map(|direction| direction.map(|direction| direction.reversed()))
                .swapped(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_none()
            && self.speed.is_none()
            && self.responsibility.is_none()
            && self.guidance.iter().all(|(_, guidance)| guidance.is_none())
            && self.direction.iter().all(|(_, direction)| direction.is_none())
    }

    /// Keeps only the values both overlays carry. Both must be given in the
    /// same orientation.
    pub fn retain_shared(&mut self, other: &mut Self) {
        fn retain<T>(a: &mut Option<T>, b: &mut Option<T>) {
            if a.is_none() || b.is_none() {
                *a = None;
                *b = None;
            }
        }

        retain(&mut self.general, &mut other.general);
        retain(&mut self.speed, &mut other.speed);
        retain(&mut self.responsibility, &mut other.responsibility);
        retain(&mut self.guidance.left, &mut other.guidance.left);
        retain(&mut self.guidance.right, &mut other.guidance.right);
        retain(&mut self.direction.left, &mut other.direction.left);
        retain(&mut self.direction.right, &mut other.direction.right);
    }
}

/// One source projected onto the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub overlay: AttributeOverlay,
    /// The part of the target covered, in the target's stationing.
    pub interval: Interval,
    /// Whether the source runs along the target's stationing.
    pub same_direction: bool,
    pub source: Option<SourceSystem>,
}

impl Projection {
    /// A source covering the entire target.
    pub fn full(
        overlay: AttributeOverlay,
        same_direction: bool,
        source: Option<SourceSystem>,
    ) -> Self {
        Self {
            overlay,
            interval: Interval::FULL,
            same_direction,
            source,
        }
    }
}

/// An interval of one category (and side) on which the sources disagreed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryConflict {
    pub category: AttributeCategory,
    pub side: Option<Side>,
    pub interval: Interval,
    pub resolution: Resolution<SourceSystem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionOutcome {
    pub attributes: EdgeAttributes,
    pub conflicts: Vec<CategoryConflict>,
}

/// A source overlay brought into the target's orientation.
struct Aligned<'a> {
    overlay: AttributeOverlay,
    interval: &'a Interval,
    source: Option<SourceSystem>,
}

struct CategoryMerge<'a> {
    config: &'a MergeConfig,
    conflicts: Vec<CategoryConflict>,
}

impl CategoryMerge<'_> {
    fn merger(&self, category: AttributeCategory) -> Merger<SourceSystem> {
        Merger::new(self.config.tolerance).with_authority(self.config.authority(category))
    }

    fn record<V>(
        &mut self,
        category: AttributeCategory,
        side: Option<Side>,
        conflicts: Vec<radnetz_linear::Conflict<V, SourceSystem>>,
    ) {
        self.conflicts
            .extend(conflicts.into_iter().map(|conflict| CategoryConflict {
                category,
                side,
                interval: conflict.interval,
                resolution: conflict.resolution,
            }));
    }

    fn linear<'s, V>(
        &mut self,
        category: AttributeCategory,
        side: Option<Side>,
        base: &LinearAttribute<V>,
        sources: impl Iterator<
            Item = (
                Option<&'s LinearAttribute<V>>,
                &'s Interval,
                Option<SourceSystem>,
            ),
        >,
    ) -> LinearAttribute<V>
    where
        V: Clone + AttributeEq + 's,
    {
        let overlays = sources
            .filter_map(|(value, interval, source)| {
                value.map(|value| Overlay::new(source, value.rescaled_into(interval)))
            })
            .collect::<Vec<_>>();

        let epsilon = self.config.epsilon(category);
        let outcome = self
            .merger(category)
            .merge(base, &overlays, |a, b| a.eq_within(b, epsilon));

        self.record(category, side, outcome.conflicts);
        outcome.attribute
    }

    /// Merges a category holding one value per edge. The overlay value is
    /// only taken when it ends up covering the whole edge.
    fn uniform<'s, V>(
        &mut self,
        category: AttributeCategory,
        side: Option<Side>,
        base: &V,
        sources: impl Iterator<Item = (Option<&'s V>, &'s Interval, Option<SourceSystem>)>,
    ) -> V
    where
        V: Clone + AttributeEq + 's,
    {
        let overlays = sources
            .filter_map(|(value, interval, source)| {
                value.map(|value| {
                    Overlay::new(source, vec![Segment::new(*interval, value.clone())])
                })
            })
            .collect::<Vec<_>>();

        let epsilon = self.config.epsilon(category);
        let outcome = self.merger(category).merge(
            &LinearAttribute::uniform(base.clone()),
            &overlays,
            |a, b| a.eq_within(b, epsilon),
        );

        self.record(category, side, outcome.conflicts);

        match outcome.attribute.uniform_value_by(|a, b| a.eq_within(b, epsilon)) {
            Some(value) => value.clone(),
            None => {
                trace!("Partial {category} overlay on {side:?} keeps the target value");
                base.clone()
            }
        }
    }
}

/// Merges the projected sources into `target`, category by category.
pub fn project(
    target: &EdgeAttributes,
    projections: &[Projection],
    config: &MergeConfig,
) -> ProjectionOutcome {
    let aligned = projections
        .iter()
        .map(|projection| Aligned {
            overlay: projection.overlay.oriented(projection.same_direction),
            interval: &projection.interval,
            source: projection.source,
        })
        .collect::<Vec<_>>();

    let mut merge = CategoryMerge {
        config,
        conflicts: Vec::new(),
    };

    let environment = merge.uniform(
        AttributeCategory::General,
        None,
        &target.general.environment(),
        aligned
            .iter()
            .map(|a| (a.overlay.general.as_ref(), a.interval, a.source)),
    );

    let speed = merge.linear(
        AttributeCategory::Speed,
        None,
        &target.speed,
        aligned
            .iter()
            .map(|a| (a.overlay.speed.as_ref(), a.interval, a.source)),
    );

    let responsibility = merge.linear(
        AttributeCategory::Responsibility,
        None,
        &target.responsibility,
        aligned
            .iter()
            .map(|a| (a.overlay.responsibility.as_ref(), a.interval, a.source)),
    );

    let guidance = Sided::new(
        merge.linear(
            AttributeCategory::Guidance,
            Some(Side::Left),
            &target.guidance.left,
            aligned
                .iter()
                .map(|a| (a.overlay.guidance.left.as_ref(), a.interval, a.source)),
        ),
        merge.linear(
            AttributeCategory::Guidance,
            Some(Side::Right),
            &target.guidance.right,
            aligned
                .iter()
                .map(|a| (a.overlay.guidance.right.as_ref(), a.interval, a.source)),
        ),
    );

    let direction = Sided::new(
        merge.uniform(
            AttributeCategory::Direction,
            Some(Side::Left),
            &target.direction.left,
            aligned
                .iter()
                .map(|a| (a.overlay.direction.left.as_ref(), a.interval, a.source)),
        ),
        merge.uniform(
            AttributeCategory::Direction,
            Some(Side::Right),
            &target.direction.right,
            aligned
                .iter()
                .map(|a| (a.overlay.direction.right.as_ref(), a.interval, a.source)),
        ),
    );

    let mut attributes = EdgeAttributes {
        general: target.general.with_environment(environment),
        speed,
        responsibility,
        guidance,
        direction,
        two_sided: target.two_sided,
    };
    attributes.update_sidedness(config.epsilon(AttributeCategory::Guidance));

    ProjectionOutcome {
        attributes,
        conflicts: merge.conflicts,
    }
}
