//! CSV export

use crate::output::traits::{ensure_parent_dir, ExportResult, Exporter, HEADERS};
use crate::store::Record;
use std::path::Path;

/// Writes records to a CSV file with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(&self, records: &[Record], path: &Path) -> ExportResult<()> {
        ensure_parent_dir(path)?;

        let mut writer = csv::WriterBuilder::new().from_path(path)?;
        writer.write_record(HEADERS)?;

        for record in records {
            writer.write_record(record.columns().iter().map(|value| value.unwrap_or("")))?;
        }

        writer.flush()?;
        Ok(())
    }
}
