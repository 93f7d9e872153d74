use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool reads a tiddler export, converts it, or writes the resulting files.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a CSV export cannot be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when the export report cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the export table lacks one of the required columns.
    #[error("missing required column '{0}' in export table")]
    MissingColumn(String),

    /// Raised when a workbook has no worksheet to read tiddlers from.
    #[error("workbook {0} contains no worksheets")]
    EmptyWorkbook(PathBuf),

    /// Raised when the input format cannot be inferred from the file name.
    #[error("unable to infer export format for file {0}")]
    UnsupportedInput(PathBuf),

    /// Raised when a requested section name maps to no known slicing policy.
    #[error("unknown section '{0}': expected a name containing 'surgery' or 'screening'")]
    UnknownSection(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
