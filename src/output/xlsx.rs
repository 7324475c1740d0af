//! Excel workbook export

use crate::output::traits::{ensure_parent_dir, ExportResult, Exporter, HEADERS};
use crate::store::Record;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Name of the single worksheet
pub const SHEET_NAME: &str = "Supplier information";

/// Writes records to an `.xlsx` workbook with a bold header row
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

/// One cell written to the worksheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell<'a> {
    row: u32,
    col: u16,
    value: &'a str,
    bold: bool,
}

/// Lays out the header row and one row per record
///
/// Absent fields produce no cell at all, leaving the worksheet cell blank.
fn layout(records: &[Record]) -> Vec<Cell<'_>> {
    let header = HEADERS.iter().enumerate().map(|(col, value)| Cell {
        row: 0,
        col: col as u16,
        value: *value,
        bold: true,
    });

    let rows = records.iter().enumerate().flat_map(|(index, record)| {
        record
            .columns()
            .into_iter()
            .enumerate()
            .filter_map(move |(col, value)| {
                value.map(|value| Cell {
                    row: (index + 1) as u32,
                    col: col as u16,
                    value,
                    bold: false,
                })
            })
    });

    header.chain(rows).collect()
}

impl Exporter for XlsxExporter {
    fn export(&self, records: &[Record], path: &Path) -> ExportResult<()> {
        ensure_parent_dir(path)?;

        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for cell in layout(records) {
            if cell.bold {
                worksheet.write_string_with_format(cell.row, cell.col, cell.value, &bold)?;
            } else {
                worksheet.write_string(cell.row, cell.col, cell.value)?;
            }
        }

        worksheet.autofit();
        workbook.save(path)?;
        Ok(())
    }
}
