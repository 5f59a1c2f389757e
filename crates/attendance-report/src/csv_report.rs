//! Delimited-text rendering of the attendance matrix.

use std::io::Write;
use std::path::Path;

use attendance_core::error::Result;
use attendance_core::models::AttendanceMatrix;

use crate::export_error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write `matrix` as CSV to `writer`: a `Name,<dates…>` header followed by
/// one row per attendee with `1`/`0` cells.
pub fn render_csv<W: Write>(writer: W, matrix: &AttendanceMatrix) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(matrix.header())?;
    for (name, cells) in matrix.rows() {
        let mut record = Vec::with_capacity(cells.len() + 1);
        record.push(name.to_string());
        record.extend(cells.iter().map(|c| c.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the CSV report to `path`, prefixed with a UTF-8 byte-order mark so
/// spreadsheet tools detect the encoding of non-ASCII names.
pub fn write_csv(path: &Path, matrix: &AttendanceMatrix) -> Result<()> {
    let mut file = std::fs::File::create(path).map_err(|e| export_error(path, e))?;
    file.write_all(UTF8_BOM).map_err(|e| export_error(path, e))?;
    render_csv(&mut file, matrix).map_err(|e| export_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_report;
    use tempfile::TempDir;

    #[test]
    fn test_render_csv_layout() {
        let mut buf = Vec::new();
        render_csv(&mut buf, &sample_report().matrix).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Name,05.01.2024,10.02.2024",
                "Alice,1,0",
                "Bob,1,1",
                "\"Ёлкин, Пётр\",0,1",
            ]
        );
    }

    #[test]
    fn test_write_csv_has_bom_and_round_trips_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");
        write_csv(&path, &sample_report().matrix).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert!(text.starts_with("Name,"));
        assert!(text.contains("Ёлкин, Пётр"));
    }
}
