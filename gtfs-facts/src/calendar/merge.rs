//! Merging day codes with identical availability.
//!
//! Day codes are visited in id order, so the first member of each equivalence
//! class to be seen is also its lexicographically smallest id and becomes the
//! representative. Masks are bucketed by fingerprint and compared in full
//! only within a bucket.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::domain::DayCodeId;

use super::day_code::DayCode;

/// The `old_id -> canonical_id` rewrite map produced by merging.
///
/// Keys are never canonical and values always are, so the map has no fixed
/// points and no chains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayCodeRewrites(BTreeMap<DayCodeId, DayCodeId>);

impl DayCodeRewrites {
    /// The canonical id replacing `id`, if `id` was merged away.
    pub fn get(&self, id: &DayCodeId) -> Option<&DayCodeId> {
        self.0.get(id)
    }

    /// The canonical id for `id`: its rewrite if merged, otherwise `id` itself.
    pub fn resolve<'a>(&'a self, id: &'a DayCodeId) -> &'a DayCodeId {
        self.0.get(id).unwrap_or(id)
    }

    /// Number of merged-away ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate rewrites in old-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&DayCodeId, &DayCodeId)> {
        self.0.iter()
    }
}

/// Canonical day codes and the rewrites that lead to them.
#[derive(Debug)]
pub(crate) struct MergeResult {
    /// Canonical day codes, sorted by id.
    pub canonical: Vec<DayCode>,
    pub rewrites: DayCodeRewrites,
}

/// Partition day codes into classes of identical masks and keep one per class.
pub(crate) fn merge_day_codes(codes: BTreeMap<DayCodeId, DayCode>) -> MergeResult {
    let mut canonical: Vec<DayCode> = Vec::with_capacity(codes.len());
    let mut buckets: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
    let mut rewrites = BTreeMap::new();

    for (id, code) in codes {
        let bucket = buckets.entry(code.availability().fingerprint()).or_default();

        let representative = bucket
            .iter()
            .map(|&idx| &canonical[idx])
            .find(|kept| kept.availability() == code.availability());

        match representative {
            Some(kept) => {
                debug!(old = %id, canonical = %kept.id(), "merged day code");
                rewrites.insert(id, kept.id().clone());
            }
            None => {
                bucket.push(canonical.len());
                canonical.push(code);
            }
        }
    }

    MergeResult {
        canonical,
        rewrites: DayCodeRewrites(rewrites),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::mask::AvailabilityMask;
    use crate::domain::{WeekDescriptor, WeekPattern};
    use chrono::NaiveDate;

    fn id(s: &str) -> DayCodeId {
        DayCodeId::from_service_id(s).unwrap()
    }

    fn code(name: &str, pattern: [bool; 7]) -> DayCode {
        let pattern = WeekPattern::new(pattern);
        let start = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        DayCode::new(
            id(name),
            start,
            NaiveDate::from_ymd_opt(2020, 6, 30).unwrap(),
            WeekDescriptor::Weekly(pattern),
            AvailabilityMask::tiled(&pattern, 0, 29, 406).unwrap(),
        )
    }

    fn map(codes: Vec<DayCode>) -> BTreeMap<DayCodeId, DayCode> {
        codes.into_iter().map(|c| (c.id().clone(), c)).collect()
    }

    const WEEKDAYS: [bool; 7] = [true, true, true, true, true, false, false];
    const WEEKENDS: [bool; 7] = [false, false, false, false, false, true, true];

    #[test]
    fn distinct_masks_all_kept() {
        let result = merge_day_codes(map(vec![code("A", WEEKDAYS), code("B", WEEKENDS)]));
        assert_eq!(result.canonical.len(), 2);
        assert!(result.rewrites.is_empty());
    }

    #[test]
    fn identical_masks_merge_to_smallest_id() {
        let result = merge_day_codes(map(vec![
            code("C", WEEKDAYS),
            code("A", WEEKDAYS),
            code("B", WEEKDAYS),
        ]));
        assert_eq!(result.canonical.len(), 1);
        assert_eq!(result.canonical[0].id(), &id("A"));
        assert_eq!(result.rewrites.get(&id("B")), Some(&id("A")));
        assert_eq!(result.rewrites.get(&id("C")), Some(&id("A")));
        assert_eq!(result.rewrites.get(&id("A")), None);
    }

    #[test]
    fn canonical_sorted_by_id() {
        let result = merge_day_codes(map(vec![
            code("Z", WEEKENDS),
            code("M", WEEKDAYS),
            code("N", WEEKDAYS),
            code("B", [true; 7]),
        ]));
        let ids: Vec<&str> = result.canonical.iter().map(|c| c.id().as_str()).collect();
        assert_eq!(ids, vec!["B", "M", "Z"]);
    }

    #[test]
    fn resolve_falls_back_to_self() {
        let result = merge_day_codes(map(vec![code("A", WEEKDAYS), code("B", WEEKDAYS)]));
        assert_eq!(result.rewrites.resolve(&id("B")), &id("A"));
        assert_eq!(result.rewrites.resolve(&id("A")), &id("A"));
        assert_eq!(result.rewrites.resolve(&id("Q")), &id("Q"));
    }

    #[test]
    fn empty_input() {
        let result = merge_day_codes(BTreeMap::new());
        assert!(result.canonical.is_empty());
        assert!(result.rewrites.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::calendar::mask::AvailabilityMask;
    use crate::domain::{WeekDescriptor, WeekPattern};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    /// Day codes drawn from a small pool of patterns so merges are common.
    fn codes_strategy() -> impl Strategy<Value = BTreeMap<DayCodeId, DayCode>> {
        prop::collection::vec((0u8..4, 0usize..3), 0..20).prop_map(|specs| {
            let start = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
            let end = NaiveDate::from_ymd_opt(2020, 6, 30).unwrap();
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (pattern_idx, lead_weeks))| {
                    let mut days = [false; 7];
                    days[pattern_idx as usize] = true;
                    let pattern = WeekPattern::new(days);
                    let id = DayCodeId::from_service_id(&format!("S{i}")).unwrap();
                    let mask = AvailabilityMask::tiled(&pattern, lead_weeks * 7, 28, 406).unwrap();
                    let code =
                        DayCode::new(id.clone(), start, end, WeekDescriptor::Weekly(pattern), mask);
                    (id, code)
                })
                .collect()
        })
    }

    proptest! {
        /// No two canonical day codes share a mask
        #[test]
        fn canonical_masks_distinct(codes in codes_strategy()) {
            let result = merge_day_codes(codes);
            for (i, a) in result.canonical.iter().enumerate() {
                for b in &result.canonical[i + 1..] {
                    prop_assert_ne!(a.availability(), b.availability());
                }
            }
        }

        /// Rewrites have no fixed points and only point at canonical ids
        #[test]
        fn rewrites_point_at_canonical(codes in codes_strategy()) {
            let result = merge_day_codes(codes);
            for (old, new) in result.rewrites.iter() {
                prop_assert_ne!(old, new);
                prop_assert!(result.canonical.iter().any(|c| c.id() == new));
                prop_assert!(result.canonical.iter().all(|c| c.id() != old));
                prop_assert!(new < old);
            }
        }

        /// Every input id is either canonical or rewritten, never both
        #[test]
        fn every_id_accounted_for(codes in codes_strategy()) {
            let input_ids: Vec<DayCodeId> = codes.keys().cloned().collect();
            let masks: BTreeMap<DayCodeId, AvailabilityMask> = codes
                .iter()
                .map(|(k, v)| (k.clone(), v.availability().clone()))
                .collect();
            let result = merge_day_codes(codes);
            prop_assert_eq!(result.canonical.len() + result.rewrites.len(), input_ids.len());
            for id in &input_ids {
                let canonical = result.rewrites.resolve(id);
                let kept = result.canonical.iter().find(|c| c.id() == canonical).unwrap();
                prop_assert_eq!(kept.availability(), &masks[id]);
            }
        }
    }
}
