//! The date window covered by availability masks.

use chrono::{Duration, NaiveDate};

use crate::domain::days_between;

/// The compile-time date window `[start, end)`.
///
/// `start` is always a Monday and is slot 0 of every availability mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    start: NaiveDate,
    end: NaiveDate,
    mask_length: usize,
}

impl Horizon {
    /// Create a horizon. `start` should be a Monday.
    pub fn new(start: NaiveDate, end: NaiveDate, mask_length: usize) -> Self {
        Self {
            start,
            end,
            mask_length,
        }
    }

    /// The first day of the horizon, slot 0.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The latest validity end seen among calendar entries.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of slots in every mask.
    pub fn mask_length(&self) -> usize {
        self.mask_length
    }

    /// Signed slot offset of `date`. May fall outside the mask.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        days_between(self.start, date)
    }

    /// Whether `date` has a slot in the mask.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let offset = self.offset_of(date);
        offset >= 0 && (offset as u64) < self.mask_length as u64
    }

    /// The last date that still has a slot in the mask.
    pub fn last_representable(&self) -> NaiveDate {
        self.start + Duration::days(self.mask_length as i64 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn offsets_from_start() {
        let h = Horizon::new(date(2020, 6, 1), date(2020, 6, 30), 406);
        assert_eq!(h.offset_of(date(2020, 6, 1)), 0);
        assert_eq!(h.offset_of(date(2020, 6, 10)), 9);
        assert_eq!(h.offset_of(date(2020, 5, 31)), -1);
    }

    #[test]
    fn contains_bounds() {
        let h = Horizon::new(date(2020, 6, 1), date(2020, 6, 30), 406);
        assert!(h.contains(date(2020, 6, 1)));
        assert!(h.contains(h.last_representable()));
        assert!(!h.contains(h.last_representable() + Duration::days(1)));
        assert!(!h.contains(date(2020, 5, 31)));
    }

    #[test]
    fn last_representable_day() {
        let h = Horizon::new(date(2020, 6, 1), date(2020, 6, 30), 406);
        assert_eq!(h.offset_of(h.last_representable()), 405);
    }
}
