use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::{debug, instrument};

use crate::tiddly::export::error::{Result, ToolError};
use crate::tiddly::export::io::ColumnIndex;
use crate::tiddly::export::model::Tiddler;

/// Reads tiddlers from the first worksheet of an Excel workbook.
///
/// The first row holds the column names. Blank rows are skipped.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn read_tiddlers(path: &Path) -> Result<Vec<Tiddler>> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ToolError::EmptyWorkbook(path.to_path_buf()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| ToolError::EmptyWorkbook(path.to_path_buf()))??;

    let tiddlers = rows_to_tiddlers(&range)?;
    debug!(sheet = %sheet, tiddler_count = tiddlers.len(), "read tiddlers from workbook");
    Ok(tiddlers)
}

fn rows_to_tiddlers(range: &Range<DataType>) -> Result<Vec<Tiddler>> {
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| cell_to_string(Some(cell))).collect())
        .unwrap_or_default();
    let columns = ColumnIndex::locate(headers.iter().map(String::as_str))?;

    let tiddlers = rows
        .map(|row| {
            Tiddler::new(
                cell_to_string(row.get(columns.title)),
                cell_to_string(row.get(columns.text)),
                cell_to_string(row.get(columns.tags)),
            )
        })
        .filter(|tiddler| !tiddler.is_blank())
        .collect();
    Ok(tiddlers)
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
