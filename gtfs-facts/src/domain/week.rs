//! Weekly service patterns.

use std::fmt;

/// Error returned when a weekday flag is not "0" or "1".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid weekday flag: expected \"0\" or \"1\"")]
pub struct FlagError;

/// Parse a single GTFS weekday flag.
pub fn parse_flag(s: &str) -> Result<bool, FlagError> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(FlagError),
    }
}

/// Seven on/off flags, Monday first.
///
/// # Examples
///
/// ```
/// use gtfs_facts::domain::WeekPattern;
///
/// let weekdays = WeekPattern::new([true, true, true, true, true, false, false]);
/// assert_eq!(weekdays.to_string(), "1111100");
/// assert!(weekdays.runs_on(0));
/// assert!(!weekdays.runs_on(6));
/// assert!(weekdays.runs_on(7)); // wraps to the next Monday
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekPattern([bool; 7]);

impl WeekPattern {
    /// Names of the GTFS calendar columns, in pattern order.
    pub const DAY_FIELDS: [&'static str; 7] = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];

    /// Create a pattern from Monday-first flags.
    pub fn new(days: [bool; 7]) -> Self {
        Self(days)
    }

    /// Whether the pattern runs `days_since_monday` days after a Monday.
    pub fn runs_on(&self, days_since_monday: usize) -> bool {
        self.0[days_since_monday % 7]
    }
}

impl fmt::Debug for WeekPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeekPattern({self})")
    }
}

impl fmt::Display for WeekPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.0 {
            f.write_str(if day { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// The weekly descriptor carried by a day code.
///
/// Day codes built from a calendar entry carry their weekday pattern. Day
/// codes that only exist because of a calendar exception carry `Special`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekDescriptor {
    Weekly(WeekPattern),
    Special,
}

impl fmt::Display for WeekDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekDescriptor::Weekly(pattern) => pattern.fmt(f),
            WeekDescriptor::Special => f.write_str("Special"),
        }
    }
}
