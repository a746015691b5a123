//! Prolog rendering of compiled facts.

use std::fmt;

use chrono::NaiveDate;

use crate::calendar::{AvailabilityMask, DayCode};
use crate::departures::DepartureRecord;
use crate::domain::{DayCodeId, RouteRef, StopId, WeekDescriptor, format_yymmdd};
use crate::patterns::{SegmentId, StopVisit};

/// One Prolog fact. `Display` renders it as a clause terminated by `.`.
///
/// # Examples
///
/// ```
/// use gtfs_facts::facts::Fact;
/// use chrono::NaiveDate;
///
/// let anchor = Fact::HorizonAnchor { start: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap() };
/// assert_eq!(anchor.to_string(), "dkodate(200601,1).");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fact {
    /// `dkodate(YYMMDD,1).`: the date of mask slot 0.
    HorizonAnchor { start: NaiveDate },

    /// `dko(id,from,to,w,w,w,w,'mask').`
    DayCode {
        id: DayCodeId,
        from: NaiveDate,
        to: NaiveDate,
        weeks: WeekDescriptor,
        mask: AvailabilityMask,
    },

    /// `passes4(segment, stop, position, arrival, departure).`
    Passes {
        segment: SegmentId,
        stop: StopId,
        position: u32,
        arrival: i32,
        departure: i32,
    },

    /// `ntourstops(segment, n).`
    StopCount { segment: SegmentId, stops: usize },

    /// `departureday(route, segment, clock, day_code).`
    Departure {
        route_ref: RouteRef,
        segment: SegmentId,
        clock: u32,
        day_code: DayCodeId,
    },

    /// `regbus(line).`
    Line { line: String },

    /// `route(route, line, line).`
    Route { route_ref: RouteRef, line: String },
}

impl Fact {
    pub fn day_code(code: &DayCode) -> Self {
        Fact::DayCode {
            id: code.id().clone(),
            from: code.validity_from(),
            to: code.validity_to(),
            weeks: code.weeks(),
            mask: code.availability().clone(),
        }
    }

    /// The segment fact for one visit. A first visit gets `first_arrival` as
    /// its arrival offset.
    pub fn passes(segment: SegmentId, visit: &StopVisit, first_arrival: i32) -> Self {
        Fact::Passes {
            segment,
            stop: visit.stop_id.clone(),
            position: visit.position,
            arrival: visit.arrival_offset.unwrap_or(first_arrival),
            departure: visit.departure_offset,
        }
    }

    pub fn departure(record: &DepartureRecord) -> Self {
        Fact::Departure {
            route_ref: record.route_ref.clone(),
            segment: record.segment_id,
            clock: record.departure_clock,
            day_code: record.day_code.clone(),
        }
    }

    pub fn route(route_ref: &RouteRef) -> Self {
        Fact::Route {
            route_ref: route_ref.clone(),
            line: route_ref.line().to_string(),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::HorizonAnchor { start } => write!(f, "dkodate({},1).", format_yymmdd(*start)),
            Fact::DayCode {
                id,
                from,
                to,
                weeks,
                mask,
            } => {
                let weeks = Atom(&weeks.to_string()).to_string();
                write!(
                    f,
                    "dko({},{},{},{weeks},{weeks},{weeks},{weeks},'{mask}').",
                    Atom(id.as_str()),
                    format_yymmdd(*from),
                    format_yymmdd(*to),
                )
            }
            Fact::Passes {
                segment,
                stop,
                position,
                arrival,
                departure,
            } => write!(
                f,
                "passes4({segment}, {}, {position}, {arrival}, {departure}).",
                Atom(stop.as_str())
            ),
            Fact::StopCount { segment, stops } => write!(f, "ntourstops({segment}, {stops})."),
            Fact::Departure {
                route_ref,
                segment,
                clock,
                day_code,
            } => write!(
                f,
                "departureday({}, {segment}, {clock}, {}).",
                Atom(&route_ref.to_string()),
                Atom(day_code.as_str())
            ),
            Fact::Line { line } => write!(f, "regbus({}).", Atom(line)),
            Fact::Route { route_ref, line } => {
                let line = Atom(line);
                write!(f, "route({},{line},{line}).", Atom(&route_ref.to_string()))
            }
        }
    }
}

/// A Prolog atom, quoted unless it is a plain number or a lowercase name.
struct Atom<'a>(&'a str);

impl Atom<'_> {
    fn is_bare(&self) -> bool {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => chars.all(|c| c.is_ascii_digit()),
            Some(c) if c.is_ascii_lowercase() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }
}

impl fmt::Display for Atom<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            return f.write_str(self.0);
        }
        f.write_str("'")?;
        for c in self.0.chars() {
            match c {
                '\'' => f.write_str("\\'")?,
                '\\' => f.write_str("\\\\")?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("'")
    }
}
