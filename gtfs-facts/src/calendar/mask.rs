//! Fixed-length per-day availability masks.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::domain::WeekPattern;

/// Error returned when a slot offset falls outside the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("slot {offset} is outside a mask of {len} slots")]
pub struct SlotOutOfRange {
    pub offset: i64,
    pub len: usize,
}

/// One availability flag per day, slot 0 being the horizon start.
///
/// The length is fixed when the mask is built and never changes.
///
/// # Examples
///
/// ```
/// use gtfs_facts::calendar::AvailabilityMask;
/// use gtfs_facts::domain::WeekPattern;
///
/// let weekdays = WeekPattern::new([true, true, true, true, true, false, false]);
/// let mask = AvailabilityMask::tiled(&weekdays, 7, 14, 28).unwrap();
/// assert_eq!(mask.to_string(), "0000000111110011111000000000");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityMask(Vec<bool>);

impl AvailabilityMask {
    /// A mask with every day unavailable.
    pub fn unavailable(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Tile a weekly pattern over `days` slots after `lead` unavailable slots.
    ///
    /// Slot `lead` must be a Monday. Returns `None` if `lead + days` exceeds
    /// `len`.
    pub fn tiled(pattern: &WeekPattern, lead: usize, days: usize, len: usize) -> Option<Self> {
        if lead.checked_add(days)? > len {
            return None;
        }
        let mut slots = vec![false; len];
        for (i, slot) in slots[lead..lead + days].iter_mut().enumerate() {
            *slot = pattern.runs_on(i);
        }
        Some(Self(slots))
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mask has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Availability at `slot`, or `None` past the end.
    pub fn get(&self, slot: usize) -> Option<bool> {
        self.0.get(slot).copied()
    }

    /// Set the availability of the slot at `offset` days from the start.
    ///
    /// Offsets outside the mask are rejected, never clamped or wrapped.
    pub fn set(&mut self, offset: i64, available: bool) -> Result<(), SlotOutOfRange> {
        let len = self.0.len();
        let slot = usize::try_from(offset)
            .ok()
            .filter(|s| *s < len)
            .ok_or(SlotOutOfRange { offset, len })?;
        self.0[slot] = available;
        Ok(())
    }

    /// Number of available days.
    pub fn available_days(&self) -> usize {
        self.0.iter().filter(|d| **d).count()
    }

    /// Content fingerprint for bucketing. Equal masks have equal fingerprints.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

impl fmt::Debug for AvailabilityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AvailabilityMask({} slots, {} available)",
            self.len(),
            self.available_days()
        )
    }
}

impl fmt::Display for AvailabilityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.0.iter().map(|d| if *d { '1' } else { '0' }).collect();
        f.write_str(&s)
    }
}
