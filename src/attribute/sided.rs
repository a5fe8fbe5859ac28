use crate::attribute::category::Side;
use serde::{Deserialize, Serialize};

/// A pair of values for the left and right side of travel, as seen along
/// the stationing direction of the edge carrying them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sided<T> {
    pub left: T,
    pub right: T,
}

impl<T> Sided<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// Left becomes right and vice versa, as happens when the stationing
    /// direction is reversed.
    pub fn swapped(self) -> Self {
        Self {
            left: self.right,
            right: self.left,
        }
    }

    pub fn as_ref(&self) -> Sided<&T> {
        Sided {
            left: &self.left,
            right: &self.right,
        }
    }

    pub fn map<U>(self, mut map: impl FnMut(T) -> U) -> Sided<U> {
        Sided {
            left: map(self.left),
            right: map(self.right),
        }
    }

    pub fn is_symmetric_by(&self, eq: impl Fn(&T, &T) -> bool) -> bool {
        eq(&self.left, &self.right)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Left, &self.left), (Side::Right, &self.right)].into_iter()
    }
}

impl<T: Clone> Sided<T> {
    /// The same value on both sides.
    pub fn both(value: T) -> Self {
        Self {
            left: value.clone(),
            right: value,
        }
    }
}
