//! Joining trips, segments and day codes into departures.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::calendar::CalendarOutput;
use crate::config::CompileConfig;
use crate::domain::DayCodeId;
use crate::error::CompileError;
use crate::feed::TripRecord;
use crate::patterns::{PatternOutput, SegmentId};
use crate::routes::parse_route_ref;

use super::record::{DepartureRecord, DroppedDeparture, ReferenceError};

/// Result of departure compilation.
#[derive(Debug, Clone, Default)]
pub struct DepartureOutput {
    /// Sorted, without duplicates.
    pub departures: BTreeSet<DepartureRecord>,
    /// Trips left out, in input order.
    pub dropped: Vec<DroppedDeparture>,
}

/// Build one departure per trip.
///
/// A trip id without an embedded line aborts the compile. A trip with no
/// segment or an uncompiled service is dropped and reported instead.
pub fn compile_departures(
    trips: &[TripRecord],
    patterns: &PatternOutput,
    calendar: &CalendarOutput,
    config: &CompileConfig,
) -> Result<DepartureOutput, CompileError> {
    let mut output = DepartureOutput::default();

    for trip in trips {
        let route_ref = parse_route_ref(&trip.trip_id, config)?;

        match resolve(trip, patterns, calendar) {
            Ok((segment_id, departure_clock, day_code)) => {
                output.departures.insert(DepartureRecord {
                    route_ref,
                    segment_id,
                    departure_clock,
                    day_code,
                });
            }
            Err(reason) => {
                warn!(trip = %trip.trip_id, %reason, "dropping departure");
                output.dropped.push(DroppedDeparture {
                    trip_id: trip.trip_id.clone(),
                    reason,
                });
            }
        }
    }

    info!(
        trips = trips.len(),
        departures = output.departures.len(),
        dropped = output.dropped.len(),
        "compiled departures"
    );

    Ok(output)
}

fn resolve(
    trip: &TripRecord,
    patterns: &PatternOutput,
    calendar: &CalendarOutput,
) -> Result<(SegmentId, u32, DayCodeId), ReferenceError> {
    let (Some(segment), Some(origin)) = (
        patterns.segment_of(&trip.trip_id),
        patterns.origin_of(&trip.trip_id),
    ) else {
        return Err(ReferenceError::MissingSegment);
    };

    let unknown = || ReferenceError::UnknownDayCode {
        service_id: trip.service_id.clone(),
    };
    let raw = DayCodeId::from_service_id(&trip.service_id).map_err(|_| unknown())?;
    let day_code = calendar.canonical_id(&raw).ok_or_else(unknown)?.clone();

    Ok((segment, origin.clock_value(), day_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::compile_calendar;
    use crate::feed::{CalendarRecord, StopTimeRecord};
    use crate::patterns::deduplicate_trips;

    fn calendar() -> CalendarOutput {
        compile_calendar(
            &[
                CalendarRecord::from_pattern("ATB:DayType:A", "1111100", "20200601", "20200630"),
                CalendarRecord::from_pattern("ATB:DayType:B", "1111100", "20200601", "20200630"),
                CalendarRecord::from_pattern("ATB:DayType:C", "0000011", "20200601", "20200630"),
            ],
            &[],
            &CompileConfig::default(),
        )
        .unwrap()
    }

    fn patterns() -> PatternOutput {
        let rows = vec![
            StopTimeRecord::new("X:J:1_1", "A", 0, "07:05:00", "07:05:00"),
            StopTimeRecord::new("X:J:1_1", "B", 1, "07:10:00", "07:10:00"),
            StopTimeRecord::new("X:J:1_2", "A", 0, "25:10:00", "25:10:00"),
            StopTimeRecord::new("X:J:1_2", "B", 1, "25:15:00", "25:15:00"),
        ];
        deduplicate_trips(&rows, &CompileConfig::default()).unwrap()
    }

    fn compile(trips: &[TripRecord]) -> DepartureOutput {
        compile_departures(trips, &patterns(), &calendar(), &CompileConfig::default()).unwrap()
    }

    #[test]
    fn departure_fields() {
        let output = compile(&[TripRecord::new("X:J:1_1", "ATB:DayType:C")]);
        let departure = output.departures.iter().next().unwrap();
        assert_eq!(departure.segment_id, SegmentId::new(1));
        assert_eq!(departure.departure_clock, 705);
        assert_eq!(departure.day_code.as_str(), "C");
        assert!(departure.route_ref.to_string().starts_with("bus_1_"));
    }

    #[test]
    fn clock_past_midnight() {
        let output = compile(&[TripRecord::new("X:J:1_2", "ATB:DayType:A")]);
        let departure = output.departures.iter().next().unwrap();
        assert_eq!(departure.departure_clock, 2510);
    }

    #[test]
    fn merged_day_code_is_rewritten() {
        let output = compile(&[TripRecord::new("X:J:1_1", "ATB:DayType:B")]);
        let departure = output.departures.iter().next().unwrap();
        assert_eq!(departure.day_code.as_str(), "A");
    }

    #[test]
    fn duplicate_trips_collapse() {
        let output = compile(&[
            TripRecord::new("X:J:1_1", "ATB:DayType:A"),
            TripRecord::new("X:J:1_1", "ATB:DayType:B"),
        ]);
        assert_eq!(output.departures.len(), 1);
        assert!(output.dropped.is_empty());
    }

    #[test]
    fn trip_without_stop_times_dropped() {
        let output = compile(&[TripRecord::new("X:J:1_9", "ATB:DayType:A")]);
        assert!(output.departures.is_empty());
        assert_eq!(
            output.dropped,
            vec![DroppedDeparture {
                trip_id: "X:J:1_9".to_string(),
                reason: ReferenceError::MissingSegment,
            }]
        );
    }

    #[test]
    fn unknown_service_dropped() {
        let output = compile(&[
            TripRecord::new("X:J:1_1", "ATB:DayType:Z"),
            TripRecord::new("X:J:1_2", "ATB:DayType:"),
        ]);
        assert!(output.departures.is_empty());
        assert_eq!(output.dropped.len(), 2);
        assert!(
            output
                .dropped
                .iter()
                .all(|d| matches!(d.reason, ReferenceError::UnknownDayCode { .. }))
        );
    }

    #[test]
    fn malformed_trip_id_is_fatal() {
        let err = compile_departures(
            &[TripRecord::new("bad", "ATB:DayType:A")],
            &patterns(),
            &calendar(),
            &CompileConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Parse { .. }));
    }
}
