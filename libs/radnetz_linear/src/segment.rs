use crate::error::LinearError;
use crate::interval::Interval;
use crate::PARTITION_EPSILON;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A value bound to an [`Interval`] of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment<V> {
    pub interval: Interval,
    pub value: V,
}

impl<V> Segment<V> {
    pub fn new(interval: Interval, value: V) -> Self {
        Self { interval, value }
    }

    /// Shorthand used mostly by tests and fixtures, validating the bounds.
    pub fn between(from: f64, to: f64, value: V) -> Result<Self, LinearError> {
        Ok(Self::new(Interval::new(from, to)?, value))
    }
}

impl<V: Clone> Segment<V> {
    pub fn reversed(&self) -> Self {
        Self::new(self.interval.reversed(), self.value.clone())
    }
}

/// A linearly referenced attribute: a list of segments that partitions
/// `[0, 1]` without holes or overlaps, sorted by `from`.
///
/// The list is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearAttribute<V> {
    segments: Vec<Segment<V>>,
}

impl<V> LinearAttribute<V> {
    /// A single value covering the whole edge.
    pub fn uniform(value: V) -> Self {
        Self {
            segments: vec![Segment::new(Interval::FULL, value)],
        }
    }

    /// Validates that the segments partition `[0, 1]`. Bounds are compared
    /// within [`PARTITION_EPSILON`], and the outermost bounds are pinned to
    /// exactly `0` and `1`.
    pub fn new(segments: Vec<Segment<V>>) -> Result<Self, LinearError> {
        let mut segments = segments
            .into_iter()
            .sorted_by(|a, b| a.interval.from().total_cmp(&b.interval.from()))
            .collect::<Vec<_>>();

        let (first, last) = match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => (first.interval, last.interval),
            _ => return Err(LinearError::Empty),
        };

        if first.from() > PARTITION_EPSILON {
            return Err(LinearError::NotPartition(format!(
                "first segment starts at {}",
                first.from()
            )));
        }

        if last.to() < 1.0 - PARTITION_EPSILON {
            return Err(LinearError::NotPartition(format!(
                "last segment ends at {}",
                last.to()
            )));
        }

        if let Some((a, b)) = segments.iter().tuple_windows().find(|(a, b)| {
            (a.interval.to() - b.interval.from()).abs() > PARTITION_EPSILON
        }) {
            return Err(LinearError::NotPartition(format!(
                "segment ending at {} is followed by a segment starting at {}",
                a.interval.to(),
                b.interval.from()
            )));
        }

        // Pin all shared bounds so neighbours meet exactly.
        let count = segments.len();
        for index in 0..count {
            let from = if index == 0 {
                0.0
            } else {
                segments[index - 1].interval.to()
            };
            let to = if index + 1 == count {
                1.0
            } else {
                segments[index].interval.to()
            };

            if from >= to {
                return Err(LinearError::NotPartition(format!(
                    "segment [{from}, {to}] collapses after alignment"
                )));
            }

            segments[index].interval = Interval::new_unchecked(from, to);
        }

        Ok(Self { segments })
    }

    /// Constructs from segments already known to partition `[0, 1]`.
    pub(crate) fn from_partition(segments: Vec<Segment<V>>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[Segment<V>] {
        &self.segments
    }

    /// The value at a position along the edge. Boundary positions resolve
    /// to the earlier segment.
    pub fn value_at(&self, position: f64) -> &V {
        let segment = self
            .segments
            .iter()
            .find(|segment| position <= segment.interval.to())
            .unwrap_or(&self.segments[self.segments.len() - 1]);

        &segment.value
    }

    /// The value at the start of the edge.
    pub fn first(&self) -> &V {
        &self.segments[0].value
    }

    /// The value at the end of the edge.
    pub fn last(&self) -> &V {
        &self.segments[self.segments.len() - 1].value
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.segments.iter().map(|segment| &segment.value)
    }

    pub fn map<U>(&self, mut map: impl FnMut(&V) -> U) -> LinearAttribute<U> {
        LinearAttribute {
            segments: self
                .segments
                .iter()
                .map(|segment| Segment::new(segment.interval, map(&segment.value)))
                .collect(),
        }
    }

    /// Returns the value if every segment carries the same one.
    pub fn uniform_value_by(&self, eq: impl Fn(&V, &V) -> bool) -> Option<&V> {
        let first = self.first();
        self.values().all(|value| eq(first, value)).then_some(first)
    }
}

impl<V: Clone> LinearAttribute<V> {
    /// The same attribute seen from the opposite stationing direction.
    pub fn reversed(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
        }
    }

    /// Squeezes the attribute into `outer`, yielding overlay segments for a
    /// target edge of which only `outer` is covered.
    pub fn rescaled_into(&self, outer: &Interval) -> Vec<Segment<V>> {
        self.segments
            .iter()
            .map(|segment| {
                Segment::new(segment.interval.rescaled_into(outer), segment.value.clone())
            })
            .collect()
    }

    /// Joins neighbouring segments carrying equal values.
    pub fn coalesced_by(&self, eq: impl Fn(&V, &V) -> bool) -> Self {
        Self {
            segments: coalesce(self.segments.clone(), eq),
        }
    }
}

impl<V: Default> Default for LinearAttribute<V> {
    fn default() -> Self {
        Self::uniform(V::default())
    }
}

pub(crate) fn coalesce<V>(segments: Vec<Segment<V>>, eq: impl Fn(&V, &V) -> bool) -> Vec<Segment<V>> {
    segments
        .into_iter()
        .coalesce(|a, b| {
            if eq(&a.value, &b.value) {
                Ok(Segment::new(
                    Interval::new_unchecked(a.interval.from(), b.interval.to()),
                    a.value,
                ))
            } else {
                Err((a, b))
            }
        })
        .collect()
}
