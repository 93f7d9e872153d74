use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::tiddly::export::error::Result;

/// A (tiddler, section) pair that produced no file because its text was
/// empty, a single character, or lacked the requested section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedUnit {
    /// Title of the tiddler.
    pub title: String,
    /// Requested section name, `None` for whole-text exports.
    pub section: Option<String>,
}

/// A (tiddler, section) pair whose output file could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUnit {
    /// Title of the tiddler.
    pub title: String,
    /// Requested section name, `None` for whole-text exports.
    pub section: Option<String>,
    /// Path the unit was meant to be written to.
    pub file: PathBuf,
    /// Rendered write error.
    pub error: String,
}

/// Outcome of one export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Number of tiddlers read from the export table.
    pub tiddler_count: usize,
    /// Number of tiddlers rejected by the tag filter.
    pub filtered_out: usize,
    /// Files written, in processing order.
    pub written: Vec<PathBuf>,
    /// Units that produced no file.
    pub skipped: Vec<SkippedUnit>,
    /// Units whose file could not be written.
    pub failures: Vec<FailedUnit>,
}

impl ExportReport {
    /// Whether any unit failed to export.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
