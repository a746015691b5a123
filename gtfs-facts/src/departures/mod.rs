//! Departure compilation.
//!
//! Each trip becomes one departure referencing its canonical segment and its
//! canonical day code. Trips whose references cannot be resolved are not
//! fatal: they are dropped, logged and reported.

mod compiler;
mod record;

pub use compiler::{DepartureOutput, compile_departures};
pub use record::{DepartureRecord, DroppedDeparture, ReferenceError};
