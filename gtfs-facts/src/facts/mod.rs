//! Fact output.
//!
//! Facts are rendered as Prolog clauses and grouped into the files the
//! timetable engine loads. Rendering is pure; only [`FactWriter`] touches the
//! filesystem.

mod fact;
mod set;
mod writer;

pub use fact::Fact;
pub use set::{FactFile, FactSet, PROLOG_HEADER};
pub use writer::{FactWriter, REPORT_FILE};
