use crate::interval::Interval;
use crate::segment::{coalesce, LinearAttribute, Segment};

use itertools::Itertools;
use log::debug;
use smallvec::SmallVec;

/// Breakpoints closer than this are the same breakpoint.
const BREAKPOINT_EPSILON: f64 = 1e-9;

/// Segments projected from one source onto the merge target.
///
/// The segments of a single overlay need not cover `[0, 1]`, and segments of
/// different overlays may overlap each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay<V, S> {
    pub source: Option<S>,
    pub segments: Vec<Segment<V>>,
}

impl<V, S> Overlay<V, S> {
    pub fn new(source: Option<S>, segments: Vec<Segment<V>>) -> Self {
        Self { source, segments }
    }

    /// An overlay without a known source system. It can never be authoritative.
    pub fn anonymous(segments: Vec<Segment<V>>) -> Self {
        Self {
            source: None,
            segments,
        }
    }
}

/// How a conflicting interval was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<S> {
    /// No overlay had precedence, the base value was kept.
    KeptBase,
    /// The overlay of the authoritative source won.
    Authoritative(S),
}

/// An interval on which two or more different overlay values met.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict<V, S> {
    pub interval: Interval,
    pub values: Vec<V>,
    pub resolution: Resolution<S>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome<V, S> {
    pub attribute: LinearAttribute<V>,
    pub conflicts: Vec<Conflict<V, S>>,
}

impl<V, S> MergeOutcome<V, S> {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// An overlay segment after boundary snapping.
struct Piece<'a, V, S> {
    source: Option<S>,
    from: f64,
    to: f64,
    value: &'a V,
}

impl<V, S> Piece<'_, V, S> {
    #[inline]
    fn covers(&self, position: f64) -> bool {
        self.from < position && position < self.to
    }
}

/// The side-agnostic merge algebra over linear attributes.
///
/// The merger knows nothing about the values it merges, equality is supplied
/// per call so the same merger serves every attribute category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merger<S> {
    tolerance: f64,
    authority: Option<S>,
}

impl<S> Merger<S>
where
    S: Copy + PartialEq,
{
    /// Creates a merger which closes holes and overlaps between overlay
    /// boundaries shorter than `tolerance` (as a fraction of the edge).
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
            authority: None,
        }
    }

    /// Overlays from `authority` win conflicts instead of falling back to
    /// the base value.
    pub fn with_authority(mut self, authority: Option<S>) -> Self {
        self.authority = authority;
        self
    }

    /// Merges `overlays` into `base`.
    ///
    /// The result partitions `[0, 1]`. Where no overlay applies the base
    /// value is kept, where exactly one distinct overlay value applies it
    /// replaces the base, and where several distinct values apply a
    /// [`Conflict`] is recorded and the base value (or the authoritative
    /// overlay value) is used.
    pub fn merge<V, F>(
        &self,
        base: &LinearAttribute<V>,
        overlays: &[Overlay<V, S>],
        eq: F,
    ) -> MergeOutcome<V, S>
    where
        V: Clone,
        F: Fn(&V, &V) -> bool,
    {
        let pieces = self.snap(overlays);

        if pieces.is_empty() {
            return MergeOutcome {
                attribute: base.clone(),
                conflicts: Vec::new(),
            };
        }

        let mut breakpoints = base
            .segments()
            .iter()
            .flat_map(|segment| [segment.interval.from(), segment.interval.to()])
            .chain(pieces.iter().flat_map(|piece| [piece.from, piece.to]))
            .collect::<Vec<_>>();

        breakpoints.sort_by(f64::total_cmp);
        breakpoints.dedup_by(|later, earlier| (*later - *earlier).abs() <= BREAKPOINT_EPSILON);

        if let Some(first) = breakpoints.first_mut() {
            *first = 0.0;
        }
        if let Some(last) = breakpoints.last_mut() {
            *last = 1.0;
        }

        let mut segments = Vec::with_capacity(breakpoints.len());
        let mut conflicts = Vec::new();

        for (from, to) in breakpoints.iter().copied().tuple_windows() {
            let interval = Interval::new_unchecked(from, to);
            let position = interval.midpoint();

            let covering = pieces
                .iter()
                .filter(|piece| piece.covers(position))
                .collect::<SmallVec<[_; 4]>>();

            let distinct = distinct_by(covering.iter().map(|piece| piece.value), &eq);

            let value = match distinct.as_slice() {
                [] => base.value_at(position).clone(),
                [value] => (*value).clone(),
                _ => {
                    let (resolution, value) = match self.authoritative(&covering, &eq) {
                        Some((source, value)) => (Resolution::Authoritative(source), value),
                        None => (Resolution::KeptBase, base.value_at(position)),
                    };

                    conflicts.push(Conflict {
                        interval,
                        values: distinct.iter().map(|value| (*value).clone()).collect(),
                        resolution,
                    });

                    value.clone()
                }
            };

            segments.push(Segment::new(interval, value));
        }

        let conflicts = coalesce_conflicts(conflicts, &eq);
        if !conflicts.is_empty() {
            debug!("Merge produced {} conflicting interval(s)", conflicts.len());
        }

        MergeOutcome {
            attribute: LinearAttribute::from_partition(coalesce(segments, &eq)),
            conflicts,
        }
    }

    /// Moves overlay boundaries lying closer together than the tolerance onto
    /// their common midpoint. Boundaries near the edge ends are pinned to
    /// `0` and `1`. Segments collapsing in the process are dropped.
    fn snap<'a, V>(&self, overlays: &'a [Overlay<V, S>]) -> Vec<Piece<'a, V, S>> {
        let raw = overlays
            .iter()
            .flat_map(|overlay| {
                overlay
                    .segments
                    .iter()
                    .map(move |segment| (overlay.source, segment))
            })
            .collect::<Vec<_>>();

        if raw.is_empty() {
            return Vec::new();
        }

        let mut bounds = raw
            .iter()
            .flat_map(|(_, segment)| [segment.interval.from(), segment.interval.to()])
            .chain([0.0, 1.0])
            .collect::<Vec<_>>();
        bounds.sort_by(f64::total_cmp);
        bounds.dedup();

        // (lowest, highest, target) per cluster of nearby bounds.
        let mut clusters: Vec<(f64, f64, f64)> = Vec::new();
        for bound in bounds {
            match clusters.last_mut() {
                Some((_, highest, _)) if bound - *highest < self.tolerance => *highest = bound,
                _ => clusters.push((bound, bound, bound)),
            }
        }

        for (lowest, highest, target) in clusters.iter_mut() {
            *target = if *lowest <= 0.0 {
                0.0
            } else if *highest >= 1.0 {
                1.0
            } else {
                (*lowest + *highest) / 2.0
            };
        }

        let snap = |position: f64| -> f64 {
            clusters
                .iter()
                .find(|(lowest, highest, _)| *lowest <= position && position <= *highest)
                .map(|(_, _, target)| *target)
                .unwrap_or(position)
        };

        raw.into_iter()
            .filter_map(|(source, segment)| {
                let from = snap(segment.interval.from());
                let to = snap(segment.interval.to());

                (to - from > BREAKPOINT_EPSILON).then_some(Piece {
                    source,
                    from,
                    to,
                    value: &segment.value,
                })
            })
            .collect()
    }

    fn authoritative<'v, V>(
        &self,
        covering: &[&Piece<'v, V, S>],
        eq: impl Fn(&V, &V) -> bool,
    ) -> Option<(S, &'v V)> {
        let authority = self.authority?;

        let values = distinct_by(
            covering
                .iter()
                .filter(|piece| piece.source == Some(authority))
                .map(|piece| piece.value),
            eq,
        );

        match values.as_slice() {
            [value] => Some((authority, *value)),
            _ => None,
        }
    }
}

impl<S> Default for Merger<S>
where
    S: Copy + PartialEq,
{
    fn default() -> Self {
        Self::new(0.0)
    }
}

fn distinct_by<'v, V>(
    values: impl Iterator<Item = &'v V>,
    eq: impl Fn(&V, &V) -> bool,
) -> SmallVec<[&'v V; 4]> {
    let mut distinct: SmallVec<[&'v V; 4]> = SmallVec::new();
    for value in values {
        if !distinct.iter().any(|known| eq(known, value)) {
            distinct.push(value);
        }
    }
    distinct
}

fn coalesce_conflicts<V, S>(
    conflicts: Vec<Conflict<V, S>>,
    eq: impl Fn(&V, &V) -> bool,
) -> Vec<Conflict<V, S>>
where
    S: PartialEq,
{
    conflicts
        .into_iter()
        .coalesce(|a, b| {
            let touching = (a.interval.to() - b.interval.from()).abs() <= BREAKPOINT_EPSILON;
            let same = a.resolution == b.resolution
                && a.values.len() == b.values.len()
                && a.values.iter().zip(&b.values).all(|(x, y)| eq(x, y));

            if touching && same {
                Ok(Conflict {
                    interval: Interval::new_unchecked(a.interval.from(), b.interval.to()),
                    values: a.values,
                    resolution: a.resolution,
                })
            } else {
                Err((a, b))
            }
        })
        .collect()
}
