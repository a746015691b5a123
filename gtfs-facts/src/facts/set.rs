//! Grouping facts into the files they are written to.

use super::fact::Fact;

/// First line of every fact file.
pub const PROLOG_HEADER: &str = "/* -*- Mode:Prolog; coding:utf-8; -*- */";

/// The fact files a compile produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactFile {
    /// Horizon anchor and day codes.
    DayCodes,
    /// Segment visits and stop counts.
    Passes,
    Departures,
    /// Lines and routes.
    Buses,
}

impl FactFile {
    pub const ALL: [FactFile; 4] = [
        FactFile::DayCodes,
        FactFile::Passes,
        FactFile::Departures,
        FactFile::Buses,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            FactFile::DayCodes => "regdko.pl",
            FactFile::Passes => "regpas.pl",
            FactFile::Departures => "regdep.pl",
            FactFile::Buses => "regbus.pl",
        }
    }
}

/// The ordered facts of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactSet {
    pub file: FactFile,
    pub facts: Vec<Fact>,
}

impl FactSet {
    pub fn new(file: FactFile, facts: Vec<Fact>) -> Self {
        Self { file, facts }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// The full file contents: the header, then one fact per line.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 * (self.facts.len() + 1));
        out.push_str(PROLOG_HEADER);
        out.push('\n');
        for fact in &self.facts {
            out.push_str(&fact.to_string());
            out.push('\n');
        }
        out
    }
}
