use crate::error::LinearError;
use serde::{Deserialize, Serialize};

/// A sub-interval `[from, to]` of an edge, expressed as fractions of the
/// edge length along its stationing direction.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    from: f64,
    to: f64,
}

impl Interval {
    /// The whole edge, `[0, 1]`.
    pub const FULL: Interval = Interval { from: 0.0, to: 1.0 };

    pub fn new(from: f64, to: f64) -> Result<Self, LinearError> {
        if !(0.0..=1.0).contains(&from) || !(0.0..=1.0).contains(&to) || from >= to {
            return Err(LinearError::InvalidInterval { from, to });
        }

        Ok(Self { from, to })
    }

    /// Constructs an interval without validating its bounds.
    /// The caller guarantees `0 <= from < to <= 1`.
    pub(crate) fn new_unchecked(from: f64, to: f64) -> Self {
        debug_assert!(from < to, "interval [{from}, {to}] is empty");
        Self { from, to }
    }

    #[inline]
    pub fn from(&self) -> f64 {
        self.from
    }

    #[inline]
    pub fn to(&self) -> f64 {
        self.to
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.to - self.from
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.from + self.to) / 2.0
    }

    /// Whether the position lies strictly inside the interval.
    #[inline]
    pub fn covers(&self, position: f64) -> bool {
        self.from < position && position < self.to
    }

    /// The same interval seen from the opposite stationing direction.
    pub fn reversed(&self) -> Self {
        Self {
            from: 1.0 - self.to,
            to: 1.0 - self.from,
        }
    }

    /// Maps this interval, given relative to `[0, 1]`, into `outer`.
    ///
    /// Used when a source edge covers only part of a target edge: the
    /// source's own `[0, 1]` is squeezed into the covered part.
    pub fn rescaled_into(&self, outer: &Interval) -> Self {
        let width = outer.length();
        Self {
            from: outer.from + self.from * width,
            to: outer.from + self.to * width,
        }
    }

    /// Whether both bounds agree within `epsilon`.
    pub fn approx_eq(&self, other: &Interval, epsilon: f64) -> bool {
        (self.from - other.from).abs() <= epsilon && (self.to - other.to).abs() <= epsilon
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::FULL
    }
}
