//! Service date handling for GTFS calendars.
//!
//! GTFS provides dates as "YYYYMMDD" strings. Availability masks are laid out
//! in whole weeks starting on a Monday, so this module also provides the
//! Monday alignment helpers the calendar compiler relies on.

use chrono::{Datelike, Duration, NaiveDate};

/// Error returned when parsing an invalid date string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct DateError {
    reason: &'static str,
}

impl DateError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse a GTFS date in "YYYYMMDD" format.
///
/// # Examples
///
/// ```
/// use gtfs_facts::domain::parse_feed_date;
/// use chrono::NaiveDate;
///
/// let date = parse_feed_date("20200601").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2020, 6, 1).unwrap());
///
/// assert!(parse_feed_date("2020-06-01").is_err());
/// assert!(parse_feed_date("20201301").is_err());
/// ```
pub fn parse_feed_date(s: &str) -> Result<NaiveDate, DateError> {
    let bytes = s.as_bytes();
    if bytes.len() != 8 {
        return Err(DateError::new("expected YYYYMMDD format"));
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(DateError::new("expected only digits"));
    }

    let year: i32 = s[0..4]
        .parse()
        .map_err(|_| DateError::new("invalid year digits"))?;
    let month: u32 = s[4..6]
        .parse()
        .map_err(|_| DateError::new("invalid month digits"))?;
    let day: u32 = s[6..8]
        .parse()
        .map_err(|_| DateError::new("invalid day digits"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::new("no such calendar day"))
}

/// Returns `date` itself if it is a Monday, otherwise the following Monday.
///
/// # Examples
///
/// ```
/// use gtfs_facts::domain::next_monday_on_or_after;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
/// assert_eq!(next_monday_on_or_after(monday), monday);
///
/// let wednesday = NaiveDate::from_ymd_opt(2020, 6, 3).unwrap();
/// assert_eq!(
///     next_monday_on_or_after(wednesday),
///     NaiveDate::from_ymd_opt(2020, 6, 8).unwrap()
/// );
/// ```
pub fn next_monday_on_or_after(date: NaiveDate) -> NaiveDate {
    let from_monday = date.weekday().num_days_from_monday() as i64;
    let ahead = (7 - from_monday) % 7;
    date + Duration::days(ahead)
}

/// Returns the Monday of the week containing `date`.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Number of days from `from` to `to`. Negative if `to` is before `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Format a date as "YYMMDD", the form used in fact output.
pub fn format_yymmdd(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_valid_dates() {
        assert_eq!(parse_feed_date("20200601").unwrap(), date(2020, 6, 1));
        assert_eq!(parse_feed_date("20201231").unwrap(), date(2020, 12, 31));
        assert_eq!(parse_feed_date("20240229").unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn reject_wrong_length() {
        assert!(parse_feed_date("2020061").is_err());
        assert!(parse_feed_date("202006011").is_err());
        assert!(parse_feed_date("").is_err());
    }

    #[test]
    fn reject_non_digits() {
        assert!(parse_feed_date("2020-6-1").is_err());
        assert!(parse_feed_date("2020O601").is_err());
    }

    #[test]
    fn reject_impossible_days() {
        assert!(parse_feed_date("20200230").is_err());
        assert!(parse_feed_date("20230229").is_err());
        assert!(parse_feed_date("20201301").is_err());
        assert!(parse_feed_date("20200100").is_err());
    }

    #[test]
    fn error_display() {
        let err = parse_feed_date("2020").unwrap_err();
        assert_eq!(err.to_string(), "invalid date: expected YYYYMMDD format");
    }

    #[test]
    fn next_monday_keeps_monday() {
        assert_eq!(next_monday_on_or_after(date(2020, 6, 1)), date(2020, 6, 1));
    }

    #[test]
    fn next_monday_advances_other_days() {
        // Tuesday through Sunday all move to 2020-06-08
        for d in 2..=7 {
            assert_eq!(next_monday_on_or_after(date(2020, 6, d)), date(2020, 6, 8));
        }
    }

    #[test]
    fn monday_of_week_goes_back() {
        assert_eq!(monday_of_week(date(2020, 7, 1)), date(2020, 6, 29));
        assert_eq!(monday_of_week(date(2020, 6, 29)), date(2020, 6, 29));
        assert_eq!(monday_of_week(date(2020, 7, 5)), date(2020, 6, 29));
    }

    #[test]
    fn days_between_signed() {
        assert_eq!(days_between(date(2020, 6, 1), date(2020, 6, 30)), 29);
        assert_eq!(days_between(date(2020, 6, 10), date(2020, 6, 1)), -9);
        assert_eq!(days_between(date(2020, 6, 1), date(2020, 6, 1)), 0);
    }

    #[test]
    fn yymmdd_format() {
        assert_eq!(format_yymmdd(date(2020, 6, 1)), "200601");
        assert_eq!(format_yymmdd(date(2009, 12, 31)), "091231");
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(
            next_monday_on_or_after(date(2021, 1, 1)).weekday(),
            Weekday::Mon
        );
    }
}
