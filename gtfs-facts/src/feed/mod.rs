//! Feed input: raw GTFS records and the directory loader.
//!
//! The compile stages take [`FeedInput`] and never touch the filesystem.

mod loader;
mod records;

pub use loader::{CALENDAR_DATES_FILE, CALENDAR_FILE, STOP_TIMES_FILE, TRIPS_FILE, load_feed};
pub use records::{CalendarRecord, ExceptionRecord, FeedInput, StopTimeRecord, TripRecord};
