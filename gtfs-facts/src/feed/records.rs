//! Raw feed records.
//!
//! These mirror the GTFS files column for column and keep every value as the
//! string found in the feed. Parsing happens in the compile stages, where
//! failures can be reported with the owning entity.

use serde::{Deserialize, Serialize};

/// A row of `calendar.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRecord {
    pub service_id: String,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
    pub saturday: String,
    pub sunday: String,
    pub start_date: String,
    pub end_date: String,
}

impl CalendarRecord {
    /// Build a record from a Monday-first flag string such as `"1111100"`.
    ///
    /// Characters beyond the seventh are ignored; missing ones become empty
    /// fields, which fail to parse at compile time.
    pub fn from_pattern(service_id: &str, pattern: &str, start_date: &str, end_date: &str) -> Self {
        let mut flags = pattern.chars().map(|c| c.to_string());
        let mut next = || flags.next().unwrap_or_default();
        Self {
            service_id: service_id.to_string(),
            monday: next(),
            tuesday: next(),
            wednesday: next(),
            thursday: next(),
            friday: next(),
            saturday: next(),
            sunday: next(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }

    /// The seven weekday flags, Monday first.
    pub fn weekday_flags(&self) -> [&str; 7] {
        [
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
            &self.sunday,
        ]
    }
}

/// A row of `calendar_dates.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    pub service_id: String,
    pub date: String,
    pub exception_type: String,
}

impl ExceptionRecord {
    pub fn new(service_id: &str, date: &str, exception_type: &str) -> Self {
        Self {
            service_id: service_id.to_string(),
            date: date.to_string(),
            exception_type: exception_type.to_string(),
        }
    }
}

/// A row of `trips.txt`. Columns other than these two are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    pub trip_id: String,
    pub service_id: String,
}

impl TripRecord {
    pub fn new(trip_id: &str, service_id: &str) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            service_id: service_id.to_string(),
        }
    }
}

/// A row of `stop_times.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTimeRecord {
    pub trip_id: String,
    pub stop_id: String,
    pub stop_sequence: String,
    pub arrival_time: String,
    pub departure_time: String,
}

impl StopTimeRecord {
    pub fn new(
        trip_id: &str,
        stop_id: &str,
        stop_sequence: u32,
        arrival_time: &str,
        departure_time: &str,
    ) -> Self {
        Self {
            trip_id: trip_id.to_string(),
            stop_id: stop_id.to_string(),
            stop_sequence: stop_sequence.to_string(),
            arrival_time: arrival_time.to_string(),
            departure_time: departure_time.to_string(),
        }
    }
}

/// Every record stream a compile needs, fully materialized.
///
/// `stop_times` must keep each trip's rows together, first stop first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedInput {
    pub calendar: Vec<CalendarRecord>,
    pub calendar_dates: Vec<ExceptionRecord>,
    pub trips: Vec<TripRecord>,
    pub stop_times: Vec<StopTimeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pattern_splits_flags() {
        let rec = CalendarRecord::from_pattern("S1", "1111100", "20200601", "20200630");
        assert_eq!(rec.weekday_flags(), ["1", "1", "1", "1", "1", "0", "0"]);
        assert_eq!(rec.start_date, "20200601");
        assert_eq!(rec.end_date, "20200630");
    }

    #[test]
    fn from_pattern_short_input_leaves_empty_fields() {
        let rec = CalendarRecord::from_pattern("S1", "11", "20200601", "20200630");
        assert_eq!(rec.wednesday, "");
        assert_eq!(rec.sunday, "");
    }

    #[test]
    fn stop_time_sequence_as_text() {
        let rec = StopTimeRecord::new("T1", "NSR:Quay:1", 3, "08:00:00", "08:01:00");
        assert_eq!(rec.stop_sequence, "3");
    }
}
