//! GTFS to Prolog fact compiler.
//!
//! Compiles a public transit feed into the fact database read by a timetable
//! reasoning engine. Service calendars become fixed-length day masks with
//! duplicates merged under one id. Trips with the same stops and timings
//! share one segment. Departures tie each trip to its segment and day code.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use gtfs_facts::config::CompileConfig;
//! use gtfs_facts::facts::FactWriter;
//! use gtfs_facts::feed::load_feed;
//! use gtfs_facts::pipeline::compile;
//!
//! # fn main() -> Result<(), gtfs_facts::error::CompileError> {
//! let feed = load_feed(Path::new("data"))?;
//! let output = compile(&feed, &CompileConfig::default())?;
//!
//! let writer = FactWriter::new("tables");
//! writer.write_all(&output.facts())?;
//! writer.write_report(&output.report)?;
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod config;
pub mod departures;
pub mod domain;
pub mod error;
pub mod facts;
pub mod feed;
pub mod patterns;
pub mod pipeline;
pub mod routes;
