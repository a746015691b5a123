//! Reads feed records from a GTFS directory.

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::CompileError;

use super::records::{CalendarRecord, ExceptionRecord, FeedInput, StopTimeRecord, TripRecord};

pub const CALENDAR_FILE: &str = "calendar.txt";
pub const CALENDAR_DATES_FILE: &str = "calendar_dates.txt";
pub const TRIPS_FILE: &str = "trips.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";

const CALENDAR_COLUMNS: &[&str] = &[
    "service_id",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "start_date",
    "end_date",
];
const CALENDAR_DATES_COLUMNS: &[&str] = &["service_id", "date", "exception_type"];
const TRIPS_COLUMNS: &[&str] = &["trip_id", "service_id"];
const STOP_TIMES_COLUMNS: &[&str] = &[
    "trip_id",
    "stop_id",
    "stop_sequence",
    "arrival_time",
    "departure_time",
];

/// Load the four record streams a compile needs from `dir`.
///
/// All four files are required. Files are read in full and closed before
/// this returns.
pub fn load_feed(dir: &Path) -> Result<FeedInput, CompileError> {
    let feed = FeedInput {
        calendar: read_records::<CalendarRecord>(dir, CALENDAR_FILE, CALENDAR_COLUMNS)?,
        calendar_dates: read_records::<ExceptionRecord>(
            dir,
            CALENDAR_DATES_FILE,
            CALENDAR_DATES_COLUMNS,
        )?,
        trips: read_records::<TripRecord>(dir, TRIPS_FILE, TRIPS_COLUMNS)?,
        stop_times: read_records::<StopTimeRecord>(dir, STOP_TIMES_FILE, STOP_TIMES_COLUMNS)?,
    };

    info!(
        calendar = feed.calendar.len(),
        calendar_dates = feed.calendar_dates.len(),
        trips = feed.trips.len(),
        stop_times = feed.stop_times.len(),
        "loaded feed from {}",
        dir.display()
    );

    Ok(feed)
}

fn read_records<T: DeserializeOwned>(
    dir: &Path,
    file_name: &'static str,
    required: &[&str],
) -> Result<Vec<T>, CompileError> {
    let path = dir.join(file_name);
    if !path.is_file() {
        return Err(CompileError::schema(file_name, "required file is missing"));
    }

    let file = File::open(&path).map_err(|source| CompileError::Io {
        path: path.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers().map_err(|source| CompileError::Csv {
        path: path.clone(),
        source,
    })?;
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(CompileError::schema(
                file_name,
                format!("missing column `{column}`"),
            ));
        }
    }

    let records = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| CompileError::Csv {
            path: path.clone(),
            source,
        })?;

    debug!(file = file_name, rows = records.len(), "read records");
    Ok(records)
}
