//! Departure records and the reasons a trip can be dropped.

use serde::Serialize;

use crate::domain::{DayCodeId, RouteRef};
use crate::patterns::SegmentId;

/// One departure: a trip's route, its segment, when it leaves the first stop
/// and on which days.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepartureRecord {
    pub route_ref: RouteRef,
    pub segment_id: SegmentId,
    /// First-stop departure as an `HHMM` integer.
    pub departure_clock: u32,
    /// Always a canonical day code id.
    pub day_code: DayCodeId,
}

/// Why a trip produced no departure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceError {
    #[error("trip has no stop times")]
    MissingSegment,

    #[error("service {service_id} has no calendar entry or exception")]
    UnknownDayCode { service_id: String },
}

/// A trip left out of the departures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedDeparture {
    pub trip_id: String,
    pub reason: ReferenceError,
}
