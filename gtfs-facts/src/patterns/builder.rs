//! Grouping stop-time rows into per-trip visit sequences.

use rustc_hash::FxHashSet;

use crate::domain::{ClockTime, StopId};
use crate::error::CompileError;
use crate::feed::{STOP_TIMES_FILE, StopTimeRecord};

use super::visit::StopVisit;

/// The visits of one trip, in row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TripStops {
    pub trip_id: String,
    /// Departure from the first stop; every offset is relative to it.
    pub origin: ClockTime,
    pub visits: Vec<StopVisit>,
}

/// Group stop-time rows into trips.
///
/// A row whose `stop_sequence` equals `first_stop_sequence` opens a trip;
/// every following row up to the next opening row must belong to it.
pub(crate) fn group_trips(
    rows: &[StopTimeRecord],
    first_stop_sequence: u32,
) -> Result<Vec<TripStops>, CompileError> {
    let mut trips: Vec<TripStops> = Vec::new();
    let mut started: FxHashSet<&str> = FxHashSet::default();

    for row in rows {
        let sequence = parse_sequence(row)?;
        let stop_id = StopId::from_feed_id(&row.stop_id).map_err(|_| {
            CompileError::parse(entity(row), "stop_id", "a non-empty stop id", &row.stop_id)
        })?;

        if sequence == first_stop_sequence {
            if !started.insert(&row.trip_id) {
                return Err(CompileError::schema(
                    STOP_TIMES_FILE,
                    format!("trip {} starts more than once", row.trip_id),
                ));
            }
            let origin = parse_clock(row, "departure_time", &row.departure_time)?;
            trips.push(TripStops {
                trip_id: row.trip_id.clone(),
                origin,
                visits: vec![StopVisit::first(stop_id)],
            });
            continue;
        }

        if sequence < first_stop_sequence {
            return Err(CompileError::schema(
                STOP_TIMES_FILE,
                format!(
                    "trip {} has stop_sequence {sequence} before the first stop ({first_stop_sequence})",
                    row.trip_id
                ),
            ));
        }

        let Some(open) = trips.last_mut() else {
            return Err(CompileError::schema(
                STOP_TIMES_FILE,
                format!(
                    "stop {sequence} of trip {} comes before any first stop",
                    row.trip_id
                ),
            ));
        };
        if open.trip_id != row.trip_id {
            return Err(CompileError::schema(
                STOP_TIMES_FILE,
                format!(
                    "stop {sequence} of trip {} interrupts trip {}",
                    row.trip_id, open.trip_id
                ),
            ));
        }

        let arrival = parse_clock(row, "arrival_time", &row.arrival_time)?;
        let departure = parse_clock(row, "departure_time", &row.departure_time)?;
        let position = sequence
            .checked_sub(first_stop_sequence)
            .and_then(|steps| steps.checked_add(1))
            .ok_or_else(|| {
                CompileError::parse(
                    entity(row),
                    "stop_sequence",
                    "a stop_sequence below u32::MAX",
                    &row.stop_sequence,
                )
            })?;
        open.visits.push(StopVisit {
            stop_id,
            position,
            arrival_offset: Some(arrival.minutes_after(open.origin)),
            departure_offset: departure.minutes_after(open.origin),
        });
    }

    Ok(trips)
}

fn entity(row: &StopTimeRecord) -> String {
    format!("stop time {} of trip {}", row.stop_sequence, row.trip_id)
}

fn parse_sequence(row: &StopTimeRecord) -> Result<u32, CompileError> {
    row.stop_sequence.parse().map_err(|_| {
        CompileError::parse(
            entity(row),
            "stop_sequence",
            "a non-negative integer",
            &row.stop_sequence,
        )
    })
}

fn parse_clock(
    row: &StopTimeRecord,
    field: &'static str,
    value: &str,
) -> Result<ClockTime, CompileError> {
    ClockTime::parse(value)
        .map_err(|_| CompileError::parse(entity(row), field, "HH:MM[:SS]", value))
}
