//! JSON rendering of the full report, matrix plus run metadata.

use std::path::Path;

use attendance_core::error::Result;
use attendance_data::pipeline::AttendanceReport;

use crate::export_error;

/// Write `report` to `path` as pretty-printed JSON.
pub fn write_json(path: &Path, report: &AttendanceReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| export_error(path, e))?;
    std::fs::write(path, json).map_err(|e| export_error(path, e))
}
