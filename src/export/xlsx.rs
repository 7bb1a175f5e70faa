//! Spreadsheet conversion of a finished CSV report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use super::columns::Column;

/// Converts a CSV report into a styled `.xlsx` next to it.
///
/// Every cell is centered with a thin border; numeric cells are stored as
/// numbers. The user agent and category columns are widened.
///
/// # Errors
///
/// Returns an error if the CSV cannot be read or the workbook cannot be
/// written.
pub fn convert_to_xlsx(csv_path: &Path) -> Result<PathBuf> {
    let xlsx_path = csv_path.with_extension("xlsx");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open {}", csv_path.display()))?;

    let format = Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_index, record) in reader.records().enumerate() {
        let record = record.context("Failed to read CSV record")?;
        let row = u32::try_from(row_index).context("Too many rows for a worksheet")?;

        for (col_index, value) in record.iter().enumerate() {
            let col = u16::try_from(col_index).context("Too many columns for a worksheet")?;
            if row == 0 {
                if let Some(width) = Column::from_header(value).and_then(Column::spreadsheet_width)
                {
                    worksheet.set_column_width(col, width)?;
                }
            }
            match numeric_value(row, value) {
                Some(number) => worksheet.write_number_with_format(row, col, number, &format)?,
                None => worksheet.write_string_with_format(row, col, value, &format)?,
            };
        }
    }

    workbook
        .save(&xlsx_path)
        .with_context(|| format!("Failed to write {}", xlsx_path.display()))?;
    Ok(xlsx_path)
}

/// Data cells that read as finite numbers; the header row stays text.
fn numeric_value(row: u32, value: &str) -> Option<f64> {
    if row == 0 {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
