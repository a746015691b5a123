//! Trip pattern deduplication.
//!
//! Stop-time rows are grouped per trip into stop visits timed relative to the
//! trip's first departure. Trips with identical visit sequences share one
//! segment, so a timetable with hundreds of departures along the same route
//! needs only one copy of the route's stops.

mod builder;
mod dedup;
mod visit;

pub use dedup::{PatternOutput, SegmentId, TripPattern, deduplicate_trips};
pub use visit::StopVisit;
