//! Output module for exporting records and reporting on runs
//!
//! This module handles:
//! - Exporting the sorted records as a spreadsheet or CSV file
//! - Aggregating per-listing counters into a run summary
//! - Writing the run summary as markdown

mod csv_export;
mod markdown;
mod summary;
mod traits;
mod xlsx;

pub use csv_export::CsvExporter;
pub use markdown::{format_markdown_summary, write_markdown_summary};
pub use summary::{print_summary, CrawlSummary};
pub use traits::{ExportError, ExportResult, Exporter, HEADERS};
pub use xlsx::{XlsxExporter, SHEET_NAME};

use crate::config::OutputFormat;

/// Returns the exporter for the configured output format
pub fn exporter_for(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Xlsx => Box::new(XlsxExporter),
        OutputFormat::Csv => Box::new(CsvExporter),
    }
}
