//! Calendar compilation: entries and exceptions into canonical day codes.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

use crate::config::CompileConfig;
use crate::domain::{
    DayCodeId, WeekDescriptor, WeekPattern, days_between, monday_of_week,
    next_monday_on_or_after, parse_feed_date, parse_flag,
};
use crate::error::CompileError;
use crate::feed::{CALENDAR_FILE, CalendarRecord, ExceptionRecord};

use super::day_code::{DayCode, ExceptionKind};
use super::horizon::Horizon;
use super::mask::{AvailabilityMask, SlotOutOfRange};
use super::merge::{DayCodeRewrites, merge_day_codes};

/// Result of compiling the calendar.
#[derive(Debug, Clone)]
pub struct CalendarOutput {
    /// The mask window. `None` only when there were no calendar records at all.
    pub horizon: Option<Horizon>,

    /// Canonical day codes, sorted by id, masks pairwise distinct.
    pub day_codes: Vec<DayCode>,

    /// Rewrites from merged-away ids to their canonical id.
    pub rewrites: DayCodeRewrites,

    /// Every id compiled before merging, canonical or not.
    pub known_ids: BTreeSet<DayCodeId>,

    /// Orphan exceptions that removed a day from a service with no calendar
    /// entry. These day codes never run but are kept.
    pub empty_orphans: Vec<DayCodeId>,
}

impl CalendarOutput {
    /// The canonical id for a raw day code id, or `None` if it was never compiled.
    pub fn canonical_id<'a>(&'a self, id: &'a DayCodeId) -> Option<&'a DayCodeId> {
        if self.known_ids.contains(id) {
            Some(self.rewrites.resolve(id))
        } else {
            None
        }
    }
}

/// A calendar entry with every field parsed.
struct ParsedEntry {
    id: DayCodeId,
    pattern: WeekPattern,
    monday: NaiveDate,
    end: NaiveDate,
}

/// A calendar exception with every field parsed.
struct ParsedException {
    id: DayCodeId,
    date: NaiveDate,
    kind: ExceptionKind,
}

/// Compile calendar entries and exceptions into canonical day codes.
///
/// Exceptions are applied in input order. Any unparsable field, duplicate
/// service id or date outside the mask aborts the compile.
pub fn compile_calendar(
    entries: &[CalendarRecord],
    exceptions: &[ExceptionRecord],
    config: &CompileConfig,
) -> Result<CalendarOutput, CompileError> {
    let entries = entries
        .iter()
        .map(parse_entry)
        .collect::<Result<Vec<_>, _>>()?;
    let exceptions = exceptions
        .iter()
        .map(parse_exception)
        .collect::<Result<Vec<_>, _>>()?;

    let Some(horizon) = derive_horizon(&entries, &exceptions, config.mask_length) else {
        info!("no calendar records, no day codes compiled");
        return Ok(CalendarOutput {
            horizon: None,
            day_codes: Vec::new(),
            rewrites: DayCodeRewrites::default(),
            known_ids: BTreeSet::new(),
            empty_orphans: Vec::new(),
        });
    };

    let mut codes: BTreeMap<DayCodeId, DayCode> = BTreeMap::new();
    for entry in entries {
        if codes.contains_key(&entry.id) {
            return Err(CompileError::schema(
                CALENDAR_FILE,
                format!("more than one calendar entry for service {}", entry.id),
            ));
        }
        let code = build_entry_code(entry, &horizon)?;
        codes.insert(code.id().clone(), code);
    }

    let mut orphans: BTreeSet<DayCodeId> = BTreeSet::new();
    for exception in exceptions {
        let offset = horizon.offset_of(exception.date);
        let out_of_range = || CompileError::IndexRange {
            service_id: exception.id.to_string(),
            date: exception.date,
            offset,
            mask_length: horizon.mask_length(),
        };
        if !horizon.contains(exception.date) {
            return Err(out_of_range());
        }

        match codes.get_mut(&exception.id) {
            Some(code) => code
                .apply_exception(exception.kind, exception.date, offset)
                .map_err(|_: SlotOutOfRange| out_of_range())?,
            None => {
                let code = DayCode::from_orphan_exception(
                    exception.id.clone(),
                    exception.date,
                    offset,
                    exception.kind,
                    horizon.mask_length(),
                )
                .map_err(|_: SlotOutOfRange| out_of_range())?;
                orphans.insert(exception.id.clone());
                codes.insert(exception.id, code);
            }
        }
    }

    // Orphans whose exceptions only ever removed days end up never running.
    let empty_orphans: Vec<DayCodeId> = orphans
        .into_iter()
        .filter(|id| codes.get(id).is_some_and(DayCode::never_runs))
        .collect();
    for id in &empty_orphans {
        warn!(
            day_code = %id,
            "removal exception for a service without a calendar entry; day code never runs"
        );
    }

    let known_ids: BTreeSet<DayCodeId> = codes.keys().cloned().collect();
    let merged = merge_day_codes(codes);

    info!(
        compiled = known_ids.len(),
        canonical = merged.canonical.len(),
        merged = merged.rewrites.len(),
        horizon_start = %horizon.start(),
        horizon_end = %horizon.end(),
        last_slot = %horizon.last_representable(),
        "compiled calendar"
    );

    Ok(CalendarOutput {
        horizon: Some(horizon),
        day_codes: merged.canonical,
        rewrites: merged.rewrites,
        known_ids,
        empty_orphans,
    })
}

fn parse_entry(record: &CalendarRecord) -> Result<ParsedEntry, CompileError> {
    let entity = || format!("calendar entry {}", record.service_id);

    let id = DayCodeId::from_service_id(&record.service_id).map_err(|_| {
        CompileError::parse(
            entity(),
            "service_id",
            "an id with an alphanumeric local part",
            &record.service_id,
        )
    })?;

    let mut days = [false; 7];
    for ((day, flag), field) in days
        .iter_mut()
        .zip(record.weekday_flags())
        .zip(WeekPattern::DAY_FIELDS)
    {
        *day = parse_flag(flag)
            .map_err(|_| CompileError::parse(entity(), field, "\"0\" or \"1\"", flag))?;
    }

    let start = parse_feed_date(&record.start_date)
        .map_err(|_| CompileError::parse(entity(), "start_date", "YYYYMMDD", &record.start_date))?;
    let end = parse_feed_date(&record.end_date)
        .map_err(|_| CompileError::parse(entity(), "end_date", "YYYYMMDD", &record.end_date))?;

    Ok(ParsedEntry {
        id,
        pattern: WeekPattern::new(days),
        monday: next_monday_on_or_after(start),
        end,
    })
}

fn parse_exception(record: &ExceptionRecord) -> Result<ParsedException, CompileError> {
    let entity = || format!("calendar exception {} on {}", record.service_id, record.date);

    let id = DayCodeId::from_service_id(&record.service_id).map_err(|_| {
        CompileError::parse(
            entity(),
            "service_id",
            "an id with an alphanumeric local part",
            &record.service_id,
        )
    })?;
    let date = parse_feed_date(&record.date)
        .map_err(|_| CompileError::parse(entity(), "date", "YYYYMMDD", &record.date))?;
    let kind = ExceptionKind::parse(&record.exception_type).ok_or_else(|| {
        CompileError::parse(
            entity(),
            "exception_type",
            "\"1\" (added) or \"2\" (removed)",
            &record.exception_type,
        )
    })?;

    Ok(ParsedException { id, date, kind })
}

/// The horizon spans from the earliest entry Monday to the latest entry end.
///
/// A feed with only exceptions anchors the horizon at the Monday of its
/// earliest exception instead.
fn derive_horizon(
    entries: &[ParsedEntry],
    exceptions: &[ParsedException],
    mask_length: usize,
) -> Option<Horizon> {
    let start = entries.iter().map(|e| e.monday).min();
    let end = entries.iter().map(|e| e.end).max();

    match (start, end) {
        (Some(start), Some(end)) => Some(Horizon::new(start, end, mask_length)),
        _ => {
            let first = exceptions.iter().map(|e| e.date).min()?;
            let last = exceptions.iter().map(|e| e.date).max()?;
            Some(Horizon::new(
                monday_of_week(first),
                last + Duration::days(1),
                mask_length,
            ))
        }
    }
}

fn build_entry_code(entry: ParsedEntry, horizon: &Horizon) -> Result<DayCode, CompileError> {
    let lead = days_between(horizon.start(), entry.monday);
    // An entry ending before its first Monday has no valid days.
    let days = days_between(entry.monday, entry.end).max(0);

    let availability = AvailabilityMask::tiled(
        &entry.pattern,
        lead as usize,
        days as usize,
        horizon.mask_length(),
    )
    .ok_or_else(|| CompileError::IndexRange {
        service_id: entry.id.to_string(),
        date: entry.end - Duration::days(1),
        offset: lead + days - 1,
        mask_length: horizon.mask_length(),
    })?;

    Ok(DayCode::new(
        entry.id,
        entry.monday,
        entry.end,
        WeekDescriptor::Weekly(entry.pattern),
        availability,
    ))
}
