//! Deduplicating trip visit sequences into shared segments.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use tracing::{debug, info};

use crate::config::CompileConfig;
use crate::domain::ClockTime;
use crate::error::CompileError;
use crate::feed::StopTimeRecord;

use super::builder::group_trips;
use super::visit::StopVisit;

/// Dense 1-based identifier of a canonical trip pattern.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u32);

impl SegmentId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({})", self.0)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A canonical ordered sequence of stop visits shared by one or more trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripPattern {
    pub segment_id: SegmentId,
    pub visits: Vec<StopVisit>,
    /// Trips using this pattern, in input order.
    pub trips: Vec<String>,
}

impl TripPattern {
    /// Number of stops visited.
    pub fn stop_count(&self) -> usize {
        self.visits.len()
    }
}

/// Result of pattern deduplication.
#[derive(Debug, Clone, Default)]
pub struct PatternOutput {
    /// Canonical patterns in segment id order.
    pub patterns: Vec<TripPattern>,

    pub trip_segments: BTreeMap<String, SegmentId>,

    /// Each trip's first-stop departure.
    pub trip_origins: BTreeMap<String, ClockTime>,
}

impl PatternOutput {
    /// The segment a trip was assigned, if the trip had stop times.
    pub fn segment_of(&self, trip_id: &str) -> Option<SegmentId> {
        self.trip_segments.get(trip_id).copied()
    }

    /// The first-stop departure of a trip.
    pub fn origin_of(&self, trip_id: &str) -> Option<ClockTime> {
        self.trip_origins.get(trip_id).copied()
    }
}

/// Group stop-time rows into trips and share identical visit sequences.
///
/// Segment ids are assigned densely from 1 in the order patterns are first
/// seen. Candidate patterns are bucketed by an FxHash fingerprint of their
/// visits and confirmed by full comparison.
pub fn deduplicate_trips(
    rows: &[StopTimeRecord],
    config: &CompileConfig,
) -> Result<PatternOutput, CompileError> {
    let trips = group_trips(rows, config.first_stop_sequence)?;
    let trip_count = trips.len();

    let mut output = PatternOutput::default();
    let mut buckets: FxHashMap<u64, Vec<usize>> = FxHashMap::default();

    for trip in trips {
        let bucket = buckets.entry(fingerprint(&trip.visits)).or_default();
        let existing = bucket
            .iter()
            .copied()
            .find(|&idx| output.patterns[idx].visits == trip.visits);

        let idx = match existing {
            Some(idx) => idx,
            None => {
                let idx = output.patterns.len();
                let segment_id = SegmentId::new(idx as u32 + 1);
                debug!(
                    segment = %segment_id,
                    stops = trip.visits.len(),
                    trip = %trip.trip_id,
                    "new segment"
                );
                bucket.push(idx);
                output.patterns.push(TripPattern {
                    segment_id,
                    visits: trip.visits,
                    trips: Vec::new(),
                });
                idx
            }
        };

        let pattern = &mut output.patterns[idx];
        output
            .trip_segments
            .insert(trip.trip_id.clone(), pattern.segment_id);
        output.trip_origins.insert(trip.trip_id.clone(), trip.origin);
        pattern.trips.push(trip.trip_id);
    }

    info!(
        trips = trip_count,
        segments = output.patterns.len(),
        "deduplicated trip patterns"
    );

    Ok(output)
}

fn fingerprint(visits: &[StopVisit]) -> u64 {
    let mut hasher = FxHasher::default();
    visits.hash(&mut hasher);
    hasher.finish()
}
