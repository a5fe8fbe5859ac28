use crate::gap::path::Rejection;
use crate::network::NodeId;

use chrono::{DateTime, Utc};
use geo::{Distance, Euclidean, Point, Rect};
use rstar::{Envelope, RTree, AABB};

/// A gap which could not be closed, reported at the offending node.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub reported_at: DateTime<Utc>,
    pub node: NodeId,
    pub position: Point,
    pub reason: Rejection,
    pub description: String,
}

impl Problem {
    pub fn new(node: NodeId, position: Point, reason: Rejection) -> Self {
        Self {
            reported_at: Utc::now(),
            node,
            position,
            reason,
            description: reason.description().to_string(),
        }
    }
}

impl rstar::PointDistance for Problem {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        Euclidean.distance(self.position, *point).powi(2)
    }
}

impl rstar::RTreeObject for Problem {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Receives problems as a run produces them. Records are only ever appended.
pub trait ProblemSink {
    fn record(&mut self, problem: Problem);
}

impl ProblemSink for Vec<Problem> {
    fn record(&mut self, problem: Problem) {
        self.push(problem);
    }
}

/// An in-memory problem log, queryable by area and time.
#[derive(Debug, Default)]
pub struct ProblemLog {
    tree: RTree<Problem>,
}

impl ProblemLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.tree.iter()
    }

    /// Problems located within the rectangle, borders included.
    pub fn within(&self, area: Rect) -> impl Iterator<Item = &Problem> {
        let envelope = AABB::from_corners(Point::from(area.min()), Point::from(area.max()));
        self.tree.locate_in_envelope(&envelope)
    }

    /// Problems reported at or after `time`.
    pub fn since(&self, time: DateTime<Utc>) -> impl Iterator<Item = &Problem> {
        self.tree
            .iter()
            .filter(move |problem| problem.reported_at >= time)
    }

    pub fn count(&self, reason: Rejection) -> usize {
        self.tree
            .iter()
            .filter(|problem| problem.reason == reason)
            .count()
    }
}

impl ProblemSink for ProblemLog {
    fn record(&mut self, problem: Problem) {
        self.tree.insert(problem);
    }
}
