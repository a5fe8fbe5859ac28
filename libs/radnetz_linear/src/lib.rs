//! Linear referencing for network edges.
//!
//! An edge's length is normalised to `[0, 1]` along its stationing direction,
//! and attribute values are bound to sub-intervals of it. The [`Merger`]
//! combines a base [`LinearAttribute`] with overlays projected from other
//! sources, and reports every interval on which the overlays disagree.

pub mod error;
pub mod interval;
pub mod merge;
pub mod segment;


#[doc(inline)]
pub use error::LinearError;
#[doc(inline)]
pub use interval::Interval;
#[doc(inline)]
pub use merge::{Conflict, MergeOutcome, Merger, Overlay, Resolution};
#[doc(inline)]
pub use segment::{LinearAttribute, Segment};

/// Tolerance used when validating that a set of segments partitions `[0, 1]`.
pub const PARTITION_EPSILON: f64 = 1e-6;
