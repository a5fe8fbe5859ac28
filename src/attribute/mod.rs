//! Attribute groups carried by network edges.
//!
//! Values are stored relative to the stationing direction of their edge. Use
//! [`EdgeAttributes::oriented`] to view them from the opposite direction
//! instead of swapping sides in place.

pub mod category;
pub mod general;
pub mod sided;
pub mod values;

#[cfg(test)]
mod test;

pub use category::{AttributeCategory, Side, SourceSystem};
pub use general::{Environment, GeneralAttributes, Lighting, Surroundings};
pub use sided::Sided;
pub use values::{
    Guidance, GuidanceForm, OrganisationId, Responsibility, SpeedLimit, Surface, TravelDirection,
};

use radnetz_linear::{LinearAttribute, PARTITION_EPSILON};
use serde::{Deserialize, Serialize};

/// Equality of attribute values, allowing float components to deviate by
/// at most `epsilon`.
pub trait AttributeEq {
    fn eq_within(&self, other: &Self, epsilon: f64) -> bool;
}

macro_rules! exact_attribute_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AttributeEq for $ty {
                #[inline]
                fn eq_within(&self, other: &Self, _: f64) -> bool {
                    self == other
                }
            }
        )*
    };
}

exact_attribute_eq!(Environment, SpeedLimit, Responsibility, TravelDirection);

impl AttributeEq for Guidance {
    fn eq_within(&self, other: &Self, epsilon: f64) -> bool {
        let width = match (self.width, other.width) {
            (Some(a), Some(b)) => (a - b).abs() <= epsilon,
            (None, None) => true,
            _ => false,
        };

        width && self.form == other.form && self.surface == other.surface
    }
}

impl<T: AttributeEq> AttributeEq for Option<T> {
    fn eq_within(&self, other: &Self, epsilon: f64) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.eq_within(b, epsilon),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: AttributeEq> AttributeEq for Sided<T> {
    fn eq_within(&self, other: &Self, epsilon: f64) -> bool {
        self.left.eq_within(&other.left, epsilon) && self.right.eq_within(&other.right, epsilon)
    }
}

impl<T: AttributeEq> AttributeEq for LinearAttribute<T> {
    fn eq_within(&self, other: &Self, epsilon: f64) -> bool {
        self.segments().len() == other.segments().len()
            && self
                .segments()
                .iter()
                .zip(other.segments())
                .all(|(a, b)| {
                    a.interval.approx_eq(&b.interval, PARTITION_EPSILON)
                        && a.value.eq_within(&b.value, epsilon)
                })
    }
}

/// Every attribute category of one edge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeAttributes {
    pub general: GeneralAttributes,
    pub speed: LinearAttribute<SpeedLimit>,
    pub responsibility: LinearAttribute<Responsibility>,
    pub guidance: Sided<LinearAttribute<Guidance>>,
    pub direction: Sided<TravelDirection>,
    /// Whether left and right carry distinct values.
    pub two_sided: bool,
}

impl EdgeAttributes {
    /// An edge is attribute-less (a gap candidate) when every describing
    /// category holds only default values. Street name and number are not
    /// considered.
    pub fn is_attributeless(&self) -> bool {
        self.general.is_unset()
            && self.speed.values().all(|speed| *speed == SpeedLimit::default())
            && self.responsibility.values().all(Responsibility::is_unset)
            && self
                .guidance
                .iter()
                .all(|(_, guidance)| guidance.values().all(Guidance::is_unset))
            && self
                .direction
                .iter()
                .all(|(_, direction)| *direction == TravelDirection::default())
    }

    /// Views the attributes along (`forward`) or against the stationing of
    /// their edge. Against the stationing, linear references are mirrored,
    /// left and right are swapped and travel directions are flipped.
    pub fn oriented(&self, forward: bool) -> Self {
        if forward {
            return self.clone();
        }

        Self {
            general: self.general.clone(),
            speed: self.speed.reversed(),
            responsibility: self.responsibility.reversed(),
            guidance: self.guidance.as_ref().map(LinearAttribute::reversed).swapped(),
            direction: self.direction.map(|direction| direction.reversed()).swapped(),
            two_sided: self.two_sided,
        }
    }

    /// Whether left and right agree for every sided category.
    pub fn is_symmetric(&self, guidance_epsilon: f64) -> bool {
        self.guidance
            .is_symmetric_by(|left, right| left.eq_within(right, guidance_epsilon))
            && self.direction.is_symmetric_by(|left, right| left == right)
    }

    /// Re-derives [`EdgeAttributes::two_sided`] from the side values.
    pub fn update_sidedness(&mut self, guidance_epsilon: f64) {
        self.two_sided = !self.is_symmetric(guidance_epsilon);
    }
}
