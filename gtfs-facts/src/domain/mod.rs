//! Domain types for transit feed compilation.
//!
//! This module contains validated representations of raw feed values:
//! service dates, stop clock times, weekly patterns and the identifiers that
//! appear in fact output. Each type checks its input at construction time,
//! so the compile stages can trust what they receive.

mod clock;
mod date;
mod day_code_id;
mod route_ref;
mod stop_id;
mod week;

pub use clock::{ClockError, ClockTime};
pub use date::{
    DateError, days_between, format_yymmdd, monday_of_week, next_monday_on_or_after,
    parse_feed_date,
};
pub use day_code_id::{DayCodeId, InvalidId};
pub use route_ref::{InvalidTripId, RouteRef};
pub use stop_id::StopId;
pub use week::{FlagError, WeekDescriptor, WeekPattern, parse_flag};
