//! Day codes: a service's day-by-day availability over the horizon.

use chrono::{Duration, NaiveDate};

use crate::domain::{DayCodeId, WeekDescriptor, monday_of_week};

use super::mask::{AvailabilityMask, SlotOutOfRange};

/// Whether a calendar exception adds or removes a service day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    Added,
    Removed,
}

impl ExceptionKind {
    /// Parse a GTFS `exception_type`: "1" adds, "2" removes.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(ExceptionKind::Added),
            "2" => Some(ExceptionKind::Removed),
            _ => None,
        }
    }
}

/// A service's availability over the horizon, before or after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCode {
    id: DayCodeId,
    validity_from: NaiveDate,
    validity_to: NaiveDate,
    weeks: WeekDescriptor,
    availability: AvailabilityMask,
}

impl DayCode {
    /// A day code built from a calendar entry.
    pub fn new(
        id: DayCodeId,
        validity_from: NaiveDate,
        validity_to: NaiveDate,
        weeks: WeekDescriptor,
        availability: AvailabilityMask,
    ) -> Self {
        Self {
            id,
            validity_from,
            validity_to,
            weeks,
            availability,
        }
    }

    /// A `Special` day code for an exception whose service has no calendar entry.
    ///
    /// Valid from the Monday of `date` up to the day after. The only
    /// available slot is `offset`, and only for an added exception; a removed
    /// exception leaves the mask empty.
    pub fn from_orphan_exception(
        id: DayCodeId,
        date: NaiveDate,
        offset: i64,
        kind: ExceptionKind,
        mask_length: usize,
    ) -> Result<Self, SlotOutOfRange> {
        let mut availability = AvailabilityMask::unavailable(mask_length);
        availability.set(offset, kind == ExceptionKind::Added)?;
        Ok(Self {
            id,
            validity_from: monday_of_week(date),
            validity_to: date + Duration::days(1),
            weeks: WeekDescriptor::Special,
            availability,
        })
    }

    /// Apply a calendar exception at slot `offset` for `date`.
    ///
    /// An added day also extends `validity_to` to the day after `date` when
    /// that is later than the current end.
    pub fn apply_exception(
        &mut self,
        kind: ExceptionKind,
        date: NaiveDate,
        offset: i64,
    ) -> Result<(), SlotOutOfRange> {
        match kind {
            ExceptionKind::Removed => self.availability.set(offset, false),
            ExceptionKind::Added => {
                self.availability.set(offset, true)?;
                let day_after = date + Duration::days(1);
                if day_after > self.validity_to {
                    self.validity_to = day_after;
                }
                Ok(())
            }
        }
    }

    pub fn id(&self) -> &DayCodeId {
        &self.id
    }

    pub fn validity_from(&self) -> NaiveDate {
        self.validity_from
    }

    pub fn validity_to(&self) -> NaiveDate {
        self.validity_to
    }

    pub fn weeks(&self) -> WeekDescriptor {
        self.weeks
    }

    pub fn availability(&self) -> &AvailabilityMask {
        &self.availability
    }

    /// Returns true if no day in the horizon is available.
    pub fn never_runs(&self) -> bool {
        self.availability.available_days() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WeekPattern;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn id(s: &str) -> DayCodeId {
        DayCodeId::from_service_id(s).unwrap()
    }

    fn weekday_code() -> DayCode {
        let pattern = WeekPattern::new([true, true, true, true, true, false, false]);
        DayCode::new(
            id("S1"),
            date(2020, 6, 1),
            date(2020, 6, 30),
            WeekDescriptor::Weekly(pattern),
            AvailabilityMask::tiled(&pattern, 0, 29, 406).unwrap(),
        )
    }

    #[test]
    fn parse_exception_kind() {
        assert_eq!(ExceptionKind::parse("1"), Some(ExceptionKind::Added));
        assert_eq!(ExceptionKind::parse("2"), Some(ExceptionKind::Removed));
        assert_eq!(ExceptionKind::parse("0"), None);
        assert_eq!(ExceptionKind::parse("added"), None);
    }

    #[test]
    fn removed_clears_slot_keeps_validity() {
        let mut code = weekday_code();
        code.apply_exception(ExceptionKind::Removed, date(2020, 6, 10), 9)
            .unwrap();
        assert_eq!(code.availability().get(9), Some(false));
        assert_eq!(code.validity_to(), date(2020, 6, 30));
    }

    #[test]
    fn added_inside_validity_keeps_end() {
        let mut code = weekday_code();
        code.apply_exception(ExceptionKind::Added, date(2020, 6, 6), 5)
            .unwrap();
        assert_eq!(code.availability().get(5), Some(true));
        assert_eq!(code.validity_to(), date(2020, 6, 30));
    }

    #[test]
    fn added_after_validity_extends_end() {
        let mut code = weekday_code();
        code.apply_exception(ExceptionKind::Added, date(2020, 7, 4), 33)
            .unwrap();
        assert_eq!(code.availability().get(33), Some(true));
        assert_eq!(code.validity_to(), date(2020, 7, 5));
    }

    #[test]
    fn exception_out_of_range_leaves_code_untouched() {
        let mut code = weekday_code();
        let before = code.clone();
        assert!(code
            .apply_exception(ExceptionKind::Added, date(2021, 7, 12), 406)
            .is_err());
        assert_eq!(code, before);
    }

    #[test]
    fn orphan_added_exception() {
        let code = DayCode::from_orphan_exception(
            id("S9"),
            date(2020, 7, 1),
            30,
            ExceptionKind::Added,
            406,
        )
        .unwrap();
        assert_eq!(code.weeks(), WeekDescriptor::Special);
        assert_eq!(code.validity_from(), date(2020, 6, 29));
        assert_eq!(code.validity_to(), date(2020, 7, 2));
        assert_eq!(code.availability().available_days(), 1);
        assert_eq!(code.availability().get(30), Some(true));
    }

    #[test]
    fn orphan_removed_exception_never_runs() {
        let code = DayCode::from_orphan_exception(
            id("S8"),
            date(2020, 7, 1),
            30,
            ExceptionKind::Removed,
            406,
        )
        .unwrap();
        assert!(code.never_runs());
        assert_eq!(code.availability().len(), 406);
    }
}
