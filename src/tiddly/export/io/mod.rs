pub mod csv_read;
pub mod excel_read;

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::tiddly::export::error::{Result, ToolError};
use crate::tiddly::export::model::{TAGS_COLUMN, TEXT_COLUMN, TITLE_COLUMN, Tiddler};

/// Table formats a tiddler export can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values, the format of TiddlyWiki's CSV export.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// Excel workbook; tiddlers are read from the first worksheet.
    Xlsx,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Tsv => write!(f, "tsv"),
            InputFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Attempts to infer the export format from the file extension.
pub fn detect_format(path: &Path) -> Option<InputFormat> {
    let extension = path.extension()?.to_ascii_lowercase();
    match extension.to_str()? {
        "csv" => Some(InputFormat::Csv),
        "tsv" | "tab" => Some(InputFormat::Tsv),
        "xlsx" | "xlsm" => Some(InputFormat::Xlsx),
        _ => None,
    }
}

/// Reads every tiddler from `path`, inferring the format when none is given.
pub fn read_tiddlers(path: &Path, format: Option<InputFormat>) -> Result<Vec<Tiddler>> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    let format = format
        .or_else(|| detect_format(path))
        .ok_or_else(|| ToolError::UnsupportedInput(path.to_path_buf()))?;
    debug!(%format, "reading tiddler export");

    match format {
        InputFormat::Csv => csv_read::read_tiddlers(path, b','),
        InputFormat::Tsv => csv_read::read_tiddlers(path, b'\t'),
        InputFormat::Xlsx => excel_read::read_tiddlers(path),
    }
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    pub title: usize,
    pub text: usize,
    pub tags: usize,
}

impl ColumnIndex {
    /// Locates the required columns, failing on the first one that is absent.
    pub(crate) fn locate<'a>(headers: impl IntoIterator<Item = &'a str> + Clone) -> Result<Self> {
        let position = |name: &str| {
            headers
                .clone()
                .into_iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| ToolError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            title: position(TITLE_COLUMN)?,
            text: position(TEXT_COLUMN)?,
            tags: position(TAGS_COLUMN)?,
        })
    }
}
