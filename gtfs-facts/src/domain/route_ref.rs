//! Route references derived from trip ids.

use std::fmt;

/// Error returned when a trip id does not embed a route line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip id: {reason}")]
pub struct InvalidTripId {
    reason: &'static str,
}

impl InvalidTripId {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A per-trip route reference, rendered as `<prefix>_<line>_<trip_key>`.
///
/// Trip ids are colon-delimited with the route line embedded in the third
/// part, e.g. `ATB:ServiceJourney:3_230306097811223`, whose line is `3`.
///
/// `trip_key` is a 31-polynomial hash of the full trip id over UTF-16 code
/// units, taken as an absolute value. It depends only on the id text, so the
/// same trip keeps the same reference across compiles and input orders.
///
/// # Examples
///
/// ```
/// use gtfs_facts::domain::RouteRef;
///
/// let r = RouteRef::from_trip_id("ATB:ServiceJourney:3_2303", "bus").unwrap();
/// assert_eq!(r.line(), "3");
/// assert!(r.to_string().starts_with("bus_3_"));
///
/// assert!(RouteRef::from_trip_id("no-colons", "bus").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteRef {
    prefix: String,
    line: String,
    trip_key: u32,
}

impl RouteRef {
    /// Build the route reference for a trip.
    pub fn from_trip_id(trip_id: &str, prefix: &str) -> Result<Self, InvalidTripId> {
        let route_part = trip_id
            .split(':')
            .nth(2)
            .ok_or_else(|| InvalidTripId::new("expected at least three colon-separated parts"))?;
        let line = route_part.split('_').next().unwrap_or("");
        if line.is_empty() {
            return Err(InvalidTripId::new("route part has no line"));
        }

        Ok(Self {
            prefix: prefix.to_string(),
            line: line.to_string(),
            trip_key: trip_key(trip_id),
        })
    }

    /// Returns the route line, e.g. `3`.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns the stable per-trip key.
    pub fn trip_key(&self) -> u32 {
        self.trip_key
    }
}

/// 31-polynomial hash over UTF-16 units with i32 wraparound, absolute value.
fn trip_key(trip_id: &str) -> u32 {
    trip_id
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
        .unsigned_abs()
}

impl fmt::Debug for RouteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteRef({self})")
    }
}

impl fmt::Display for RouteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.prefix, self.line, self.trip_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_line() {
        let r = RouteRef::from_trip_id("ATB:ServiceJourney:22_230306", "bus").unwrap();
        assert_eq!(r.line(), "22");
    }

    #[test]
    fn line_without_suffix() {
        let r = RouteRef::from_trip_id("ATB:ServiceJourney:5", "bus").unwrap();
        assert_eq!(r.line(), "5");
    }

    #[test]
    fn reject_missing_route_part() {
        assert!(RouteRef::from_trip_id("ATB:ServiceJourney", "bus").is_err());
        assert!(RouteRef::from_trip_id("ATB:ServiceJourney:_123", "bus").is_err());
        assert!(RouteRef::from_trip_id("", "bus").is_err());
    }

    #[test]
    fn trip_key_known_values() {
        assert_eq!(trip_key(""), 0);
        assert_eq!(trip_key("a"), 97);
        assert_eq!(trip_key("ab"), 97 * 31 + 98);
        // Wraps around i32 and takes the absolute value
        assert_eq!(trip_key("polygenelubricants"), 2_147_483_648);
    }

    #[test]
    fn same_trip_same_key() {
        let a = RouteRef::from_trip_id("A:B:1_x", "bus").unwrap();
        let b = RouteRef::from_trip_id("A:B:1_x", "bus").unwrap();
        assert_eq!(a, b);

        let c = RouteRef::from_trip_id("A:B:1_y", "bus").unwrap();
        assert_ne!(a, c);
        assert_eq!(a.line(), c.line());
    }

    #[test]
    fn display_uses_prefix() {
        let r = RouteRef::from_trip_id("A:B:7_a", "tram").unwrap();
        assert_eq!(r.to_string(), format!("tram_7_{}", r.trip_key()));
    }

    #[test]
    fn error_display() {
        let err = RouteRef::from_trip_id("x", "bus").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid trip id: expected at least three colon-separated parts"
        );
    }
}
