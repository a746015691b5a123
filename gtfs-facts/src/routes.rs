//! The route table: bus lines and per-trip route references.

use std::collections::BTreeSet;

use tracing::info;

use crate::config::CompileConfig;
use crate::domain::RouteRef;
use crate::error::CompileError;
use crate::feed::TripRecord;

/// Distinct lines and route references, both sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    pub lines: BTreeSet<String>,
    pub routes: BTreeSet<RouteRef>,
}

/// Parse the route reference of every trip.
///
/// A trip id with no embedded line is a fatal parse error.
pub fn build_route_table(
    trips: &[TripRecord],
    config: &CompileConfig,
) -> Result<RouteTable, CompileError> {
    let mut table = RouteTable::default();

    for trip in trips {
        let route = parse_route_ref(&trip.trip_id, config)?;
        table.lines.insert(route.line().to_string());
        table.routes.insert(route);
    }

    info!(
        lines = table.lines.len(),
        routes = table.routes.len(),
        "built route table"
    );

    Ok(table)
}

/// Route reference of a trip id, lifted into a compile error on failure.
pub(crate) fn parse_route_ref(trip_id: &str, config: &CompileConfig) -> Result<RouteRef, CompileError> {
    RouteRef::from_trip_id(trip_id, &config.route_prefix).map_err(|_| {
        CompileError::parse(
            format!("trip {trip_id}"),
            "trip_id",
            "<agency>:<type>:<line>_<suffix>",
            trip_id,
        )
    })
}
