//! Stop identifier type.

use std::fmt;

use super::day_code_id::{InvalidId, local_part};

/// A stop identifier, reduced to the local part of the GTFS `stop_id`.
///
/// `NSR:Quay:71181` becomes `71181`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(String);

impl StopId {
    /// Derive a stop id from a raw GTFS stop id.
    pub fn from_feed_id(raw: &str) -> Result<Self, InvalidId> {
        let local = local_part(raw).trim();
        if local.is_empty() {
            return Err(InvalidId::new("stop id has an empty local part"));
        }
        Ok(StopId(local.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
