//! Output adapters for the attendance matrix.
//!
//! Renders an [`AttendanceReport`] as delimited text, an Excel workbook, or a
//! JSON document, and writes the configured set of reports to disk.

pub mod csv_report;
pub mod json_report;
pub mod xlsx_report;

use std::fmt::Display;
use std::path::{Path, PathBuf};

use attendance_core::error::{AttendanceError, Result};
use attendance_core::settings::{OutputConfig, ReportFormat};
use attendance_data::pipeline::AttendanceReport;
use tracing::info;

pub use attendance_core as core;

/// Write every format listed in `config`, in order.
///
/// The output directory is created when missing. Returns the written paths.
pub fn write_reports(config: &OutputConfig, report: &AttendanceReport) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| export_error(&config.output_dir, e))?;

    let mut written = Vec::with_capacity(config.formats.len());
    for &format in &config.formats {
        let path = config.path_for(format);
        match format {
            ReportFormat::Csv => csv_report::write_csv(&path, &report.matrix)?,
            ReportFormat::Xlsx => xlsx_report::write_xlsx(&path, &report.matrix)?,
            ReportFormat::Json => json_report::write_json(&path, report)?,
        }
        info!("Wrote {} report to {}", format, path.display());
        written.push(path);
    }

    Ok(written)
}

/// Wrap any adapter failure as [`AttendanceError::Export`].
pub(crate) fn export_error(path: &Path, err: impl Display) -> AttendanceError {
    AttendanceError::Export {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}
