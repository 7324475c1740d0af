//! Exporter trait and error types
//!
//! Every exporter renders the same five-column schema, one row per record,
//! with absent fields left blank.

use crate::store::Record;
use std::path::Path;
use thiserror::Error;

/// Column headings, in export order
pub const HEADERS: [&str; 5] = [
    "Company Name",
    "Contact Name",
    "Contact Number",
    "Contact Email",
    "Supplier Description",
];

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Renders records to a tabular file
pub trait Exporter {
    /// Writes `records` to `path` in the order given
    ///
    /// The parent directory is created when missing.
    fn export(&self, records: &[Record], path: &Path) -> ExportResult<()>;
}

/// Creates the parent directory of `path` if it does not exist yet
pub(crate) fn ensure_parent_dir(path: &Path) -> ExportResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }
    Ok(())
}
