//! Writing fact files and the compile report to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::CompileError;

use super::set::FactSet;

/// Name of the JSON compile report written next to the fact files.
pub const REPORT_FILE: &str = "compile_report.json";

/// Writes fact files into one output directory.
#[derive(Debug, Clone)]
pub struct FactWriter {
    dir: PathBuf,
}

impl FactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write every fact set to its file, replacing existing files.
    ///
    /// Creates the output directory if needed. Returns the written paths.
    pub fn write_all(&self, sets: &[FactSet]) -> Result<Vec<PathBuf>, CompileError> {
        self.ensure_dir()?;
        sets.iter().map(|set| self.write_set(set)).collect()
    }

    /// Write the compile report as pretty-printed JSON.
    pub fn write_report<T: Serialize>(&self, report: &T) -> Result<PathBuf, CompileError> {
        self.ensure_dir()?;
        let path = self.dir.join(REPORT_FILE);
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json + "\n").map_err(|source| CompileError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn write_set(&self, set: &FactSet) -> Result<PathBuf, CompileError> {
        let path = self.dir.join(set.file.file_name());
        let io_error = |source| CompileError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_error)?;
        let mut out = BufWriter::new(file);
        out.write_all(set.render().as_bytes()).map_err(io_error)?;
        out.flush().map_err(io_error)?;

        info!(path = %path.display(), facts = set.len(), "wrote fact file");
        Ok(path)
    }

    fn ensure_dir(&self) -> Result<(), CompileError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| CompileError::Io {
            path: self.dir.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Fact, FactFile};
    use tempfile::tempdir;

    fn bus_set() -> FactSet {
        FactSet::new(
            FactFile::Buses,
            vec![Fact::Line {
                line: "3".to_string(),
            }],
        )
    }

    #[test]
    fn writes_rendered_contents() {
        let dir = tempdir().unwrap();
        let writer = FactWriter::new(dir.path());

        let set = bus_set();
        let paths = writer.write_all(std::slice::from_ref(&set)).unwrap();
        assert_eq!(paths, vec![dir.path().join("regbus.pl")]);

        let contents = std::fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(contents, set.render());
    }

    #[test]
    fn creates_nested_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("tables").join("out");
        let writer = FactWriter::new(&nested);

        writer.write_all(&[bus_set()]).unwrap();
        assert!(nested.join("regbus.pl").exists());
        assert_eq!(writer.dir(), nested.as_path());
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("regbus.pl"), "stale contents that are longer").unwrap();

        let writer = FactWriter::new(dir.path());
        writer.write_all(&[bus_set()]).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("regbus.pl")).unwrap();
        assert_eq!(contents, bus_set().render());
    }

    #[test]
    fn writes_report_json() {
        let dir = tempdir().unwrap();
        let writer = FactWriter::new(dir.path());

        let path = writer
            .write_report(&serde_json::json!({ "departures": 3 }))
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["departures"], 3);
    }

    #[test]
    fn unwritable_dir_is_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let writer = FactWriter::new(blocker.join("sub"));
        let err = writer.write_all(&[bus_set()]).unwrap_err();
        assert!(matches!(err, CompileError::Io { .. }));
    }
}
