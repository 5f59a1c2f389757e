//! Excel workbook rendering of the attendance matrix.

use std::path::Path;

use attendance_core::error::Result;
use attendance_core::models::AttendanceMatrix;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::export_error;

/// Name of the single worksheet in the workbook.
pub const SHEET_NAME: &str = "Attendance";

/// Build a workbook holding `matrix`: header strings in the first row, names
/// as strings and presence cells as numbers below.
pub fn build_workbook(matrix: &AttendanceMatrix) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in matrix.header().iter().enumerate() {
        sheet.write_string(0, col as u16, title.as_str())?;
    }

    for (row, (name, cells)) in matrix.rows().enumerate() {
        let row = row as u32 + 1;
        sheet.write_string(row, 0, name.as_str())?;
        for (col, &value) in cells.iter().enumerate() {
            sheet.write_number(row, col as u16 + 1, value)?;
        }
    }

    Ok(workbook)
}

/// Write the XLSX report to `path`.
pub fn write_xlsx(path: &Path, matrix: &AttendanceMatrix) -> Result<()> {
    let mut workbook = build_workbook(matrix).map_err(|e| export_error(path, e))?;
    workbook.save(path).map_err(|e| export_error(path, e))
}
