//! The full compile: calendar, patterns, routes, then departures.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::calendar::{CalendarOutput, Horizon, compile_calendar};
use crate::config::CompileConfig;
use crate::departures::{DepartureOutput, DroppedDeparture, compile_departures};
use crate::error::CompileError;
use crate::facts::{Fact, FactFile, FactSet};
use crate::feed::FeedInput;
use crate::patterns::{PatternOutput, deduplicate_trips};
use crate::routes::{RouteTable, build_route_table};

/// State shared by the stages of one compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileContext {
    pub config: CompileConfig,
    /// Set once the calendar has been compiled.
    pub horizon: Option<Horizon>,
}

impl CompileContext {
    pub fn new(config: CompileConfig) -> Self {
        Self {
            config,
            horizon: None,
        }
    }
}

/// Summary of a compile, written as `compile_report.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    pub horizon_start: Option<NaiveDate>,
    pub horizon_end: Option<NaiveDate>,
    pub mask_length: usize,
    /// Day codes before merging.
    pub day_codes: usize,
    pub canonical_day_codes: usize,
    pub merged_day_codes: usize,
    /// Day codes kept although no day is available.
    pub never_running_day_codes: Vec<String>,
    pub trips: usize,
    pub segments: usize,
    pub departures: usize,
    pub lines: usize,
    pub routes: usize,
    pub dropped: Vec<DroppedDeparture>,
}

impl CompileReport {
    fn new(
        context: &CompileContext,
        calendar: &CalendarOutput,
        patterns: &PatternOutput,
        routes: &RouteTable,
        departures: &DepartureOutput,
        trips: usize,
    ) -> Self {
        Self {
            horizon_start: context.horizon.map(|h| h.start()),
            horizon_end: context.horizon.map(|h| h.end()),
            mask_length: context.config.mask_length,
            day_codes: calendar.known_ids.len(),
            canonical_day_codes: calendar.day_codes.len(),
            merged_day_codes: calendar.rewrites.len(),
            never_running_day_codes: calendar
                .empty_orphans
                .iter()
                .map(ToString::to_string)
                .collect(),
            trips,
            segments: patterns.patterns.len(),
            departures: departures.departures.len(),
            lines: routes.lines.len(),
            routes: routes.routes.len(),
            dropped: departures.dropped.clone(),
        }
    }
}

/// Everything a successful compile produced.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub context: CompileContext,
    pub calendar: CalendarOutput,
    pub patterns: PatternOutput,
    pub routes: RouteTable,
    pub departures: DepartureOutput,
    pub report: CompileReport,
}

impl CompileOutput {
    /// The fact files, in write order, each with its facts in output order.
    pub fn facts(&self) -> Vec<FactSet> {
        FactFile::ALL
            .into_iter()
            .map(|file| FactSet::new(file, self.facts_for(file)))
            .collect()
    }

    fn facts_for(&self, file: FactFile) -> Vec<Fact> {
        match file {
            FactFile::DayCodes => self
                .context
                .horizon
                .map(|h| Fact::HorizonAnchor { start: h.start() })
                .into_iter()
                .chain(self.calendar.day_codes.iter().map(Fact::day_code))
                .collect(),
            FactFile::Passes => {
                let sentinel = self.context.config.first_arrival_sentinel;
                self.patterns
                    .patterns
                    .iter()
                    .flat_map(|pattern| {
                        pattern
                            .visits
                            .iter()
                            .map(move |visit| Fact::passes(pattern.segment_id, visit, sentinel))
                            .chain(std::iter::once(Fact::StopCount {
                                segment: pattern.segment_id,
                                stops: pattern.stop_count(),
                            }))
                    })
                    .collect()
            }
            FactFile::Departures => self
                .departures
                .departures
                .iter()
                .map(Fact::departure)
                .collect(),
            FactFile::Buses => self
                .routes
                .lines
                .iter()
                .map(|line| Fact::Line { line: line.clone() })
                .chain(self.routes.routes.iter().map(Fact::route))
                .collect(),
        }
    }
}

/// Compile a feed into day codes, segments, routes and departures.
///
/// Stops at the first fatal error. Unresolvable trips are not fatal and are
/// listed in the report.
pub fn compile(feed: &FeedInput, config: &CompileConfig) -> Result<CompileOutput, CompileError> {
    let mut context = CompileContext::new(config.clone());

    let calendar = compile_calendar(&feed.calendar, &feed.calendar_dates, &context.config)?;
    context.horizon = calendar.horizon;

    let patterns = deduplicate_trips(&feed.stop_times, &context.config)?;
    let routes = build_route_table(&feed.trips, &context.config)?;
    let departures = compile_departures(&feed.trips, &patterns, &calendar, &context.config)?;

    let report = CompileReport::new(
        &context,
        &calendar,
        &patterns,
        &routes,
        &departures,
        feed.trips.len(),
    );
    info!(
        day_codes = report.canonical_day_codes,
        segments = report.segments,
        departures = report.departures,
        dropped = report.dropped.len(),
        "compile finished"
    );

    Ok(CompileOutput {
        context,
        calendar,
        patterns,
        routes,
        departures,
        report,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
