//! Calendar compilation.
//!
//! Turns `calendar.txt` entries and `calendar_dates.txt` exceptions into day
//! codes: one fixed-length availability mask per service, anchored at a
//! shared Monday. Day codes with identical masks are then merged so each
//! distinct availability appears once.

mod compiler;
mod day_code;
mod horizon;
mod mask;
mod merge;

pub use compiler::{CalendarOutput, compile_calendar};
pub use day_code::{DayCode, ExceptionKind};
pub use horizon::Horizon;
pub use mask::{AvailabilityMask, SlotOutOfRange};
pub use merge::DayCodeRewrites;
