//! Stop time clock values.
//!
//! GTFS stop times are "HH:MM:SS" strings measured from noon minus twelve
//! hours on the service day. Trips running past midnight keep counting, so
//! hours of 24 and above are valid ("25:10:00" is ten past one the next
//! morning on the same service day).

use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing an invalid clock string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct ClockError {
    reason: &'static str,
}

impl ClockError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A service-day clock time that may exceed 24:00.
///
/// # Examples
///
/// ```
/// use gtfs_facts::domain::ClockTime;
///
/// let t = ClockTime::parse("07:05:30").unwrap();
/// assert_eq!(t.minutes_since_midnight(), 425);
/// assert_eq!(t.clock_value(), 705);
///
/// let late = ClockTime::parse("25:10").unwrap();
/// assert_eq!(late.clock_value(), 2510);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl ClockTime {
    /// Maximum accepted hour. Feeds rarely go beyond 48, this leaves room.
    const MAX_HOURS: u32 = 99;

    /// Parse a clock time from "H:MM", "HH:MM" or "HH:MM:SS".
    ///
    /// # Examples
    ///
    /// ```
    /// use gtfs_facts::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse("00:00").is_ok());
    /// assert!(ClockTime::parse("7:05:00").is_ok());
    /// assert!(ClockTime::parse("24:30:00").is_ok());
    ///
    /// assert!(ClockTime::parse("0705").is_err());
    /// assert!(ClockTime::parse("07:5").is_err());
    /// assert!(ClockTime::parse("07:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ClockError> {
        let mut parts = s.split(':');

        let hour_str = parts.next().unwrap_or("");
        let minute_str = parts
            .next()
            .ok_or_else(|| ClockError::new("expected HH:MM[:SS] format"))?;
        let second_str = parts.next();
        if parts.next().is_some() {
            return Err(ClockError::new("too many colon-separated fields"));
        }

        if hour_str.is_empty() || hour_str.len() > 2 {
            return Err(ClockError::new("hour must be one or two digits"));
        }
        let hours = parse_digits(hour_str).ok_or_else(|| ClockError::new("invalid hour digits"))?;
        if hours > Self::MAX_HOURS {
            return Err(ClockError::new("hour out of range"));
        }

        let minutes =
            parse_two_digits(minute_str).ok_or_else(|| ClockError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(ClockError::new("minute must be 0-59"));
        }

        let seconds = match second_str {
            None => 0,
            Some(sec) => {
                let seconds = parse_two_digits(sec)
                    .ok_or_else(|| ClockError::new("invalid second digits"))?;
                if seconds > 59 {
                    return Err(ClockError::new("second must be 0-59"));
                }
                seconds
            }
        };

        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Returns the hours, possibly 24 or more.
    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Returns the minute (0-59).
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the second (0-59).
    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Whole minutes since the start of the service day. Seconds are dropped.
    pub fn minutes_since_midnight(&self) -> i32 {
        (self.hours * 60 + self.minutes) as i32
    }

    /// Minutes from `origin` to `self`, negative if `self` is earlier.
    pub fn minutes_after(&self, origin: ClockTime) -> i32 {
        self.minutes_since_midnight() - origin.minutes_since_midnight()
    }

    /// The time as an `HHMM` integer: "07:05" is 705, "25:10" is 2510.
    ///
    /// This is a clock reading, not an elapsed duration.
    pub fn clock_value(&self) -> u32 {
        self.hours * 100 + self.minutes
    }
}

impl Ord for ClockTime {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.hours, self.minutes, self.seconds).cmp(&(other.hours, other.minutes, other.seconds))
    }
}

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Parse exactly two ASCII digits into a u32.
fn parse_two_digits(s: &str) -> Option<u32> {
    if s.len() != 2 {
        return None;
    }
    parse_digits(s)
}

fn parse_digits(s: &str) -> Option<u32> {
    s.chars()
        .try_fold(0u32, |acc, c| Some(acc * 10 + c.to_digit(10)?))
}
