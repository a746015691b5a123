//! Compile error types.
//!
//! Every variant here is fatal: a compile that returns one of these produces
//! no output. Per-trip reference problems are not errors at this level, they
//! are reported as dropped departures (see [`crate::departures::ReferenceError`]).

use std::path::PathBuf;

use chrono::NaiveDate;

/// Fatal errors that abort a compile.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A date, time, flag or identifier field could not be parsed
    #[error("cannot parse {field} of {entity}: expected {expected}, found {found:?}")]
    Parse {
        entity: String,
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A required file or column is missing, or records break a structural rule
    #[error("schema error in {file}: {detail}")]
    Schema { file: &'static str, detail: String },

    /// A date would land outside the fixed availability mask
    #[error(
        "{service_id} needs slot {offset} for {date}, outside the {mask_length}-slot availability mask"
    )]
    IndexRange {
        service_id: String,
        date: NaiveDate,
        offset: i64,
        mask_length: usize,
    },

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV file could not be decoded
    #[error("cannot read CSV file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The compile report could not be serialized
    #[error("cannot serialize compile report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CompileError {
    /// Build a [`CompileError::Parse`] for a field of a named entity.
    pub fn parse(
        entity: impl Into<String>,
        field: &'static str,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        CompileError::Parse {
            entity: entity.into(),
            field,
            expected,
            found: found.into(),
        }
    }

    /// Build a [`CompileError::Schema`] for a feed file.
    pub fn schema(file: &'static str, detail: impl Into<String>) -> Self {
        CompileError::Schema {
            file,
            detail: detail.into(),
        }
    }

    /// Returns true for errors caused by feed content rather than the filesystem.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CompileError::Parse { .. } | CompileError::Schema { .. } | CompileError::IndexRange { .. }
        )
    }
}
