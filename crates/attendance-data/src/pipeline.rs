//! Top-level report pipeline.
//!
//! Discovers the session exports, processes them one by one, and builds the
//! [`AttendanceMatrix`] ready for the output adapters.

use attendance_core::error::{AttendanceError, Result};
use attendance_core::models::AttendanceMatrix;
use attendance_core::settings::PipelineConfig;
use chrono::Utc;
use tracing::{debug, info};

use crate::matrix::MatrixBuilder;
use crate::processor::{ProcessingOutcome, SessionProcessor};
use crate::reader::find_session_files;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the matrix.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp when this report was generated.
    pub generated_at: String,
    /// Number of session files discovered.
    pub files_found: usize,
    /// Number of files whose session made it into the matrix.
    pub files_processed: usize,
    /// Number of files excluded by a per-file error.
    pub files_skipped: usize,
    /// Number of matrix columns.
    pub sessions: usize,
    /// Number of matrix rows.
    pub attendees: usize,
}

/// The complete output of [`build_report`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct AttendanceReport {
    pub matrix: AttendanceMatrix,
    pub metadata: ReportMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline.
///
/// 1. List the `.csv` files in `config.input_dir`.
/// 2. Extract one session per file with [`SessionProcessor`].
/// 3. Build the matrix with [`MatrixBuilder`].
///
/// Returns [`AttendanceError::NoInputFound`] when there are no files at all,
/// and `Ok(None)` when files exist but none produced a session.
pub fn build_report(config: &PipelineConfig) -> Result<Option<AttendanceReport>> {
    let files = find_session_files(&config.input_dir);
    if files.is_empty() {
        return Err(AttendanceError::NoInputFound(config.input_dir.clone()));
    }
    info!(
        "Found {} session files in {}",
        files.len(),
        config.input_dir.display()
    );

    let processor = SessionProcessor::new(config.duplicate_policy, config.locale);
    let outcome = processor.process_paths(&files);

    Ok(report_from_outcome(files.len(), &outcome))
}

/// Build the report for an already-processed batch, or `None` when it holds
/// no sessions.
pub fn report_from_outcome(
    files_found: usize,
    outcome: &ProcessingOutcome,
) -> Option<AttendanceReport> {
    if outcome.is_empty() {
        return None;
    }

    let matrix = MatrixBuilder::build(&outcome.sessions);
    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339(),
        files_found,
        files_processed: outcome.processed.len(),
        files_skipped: outcome.skipped.len(),
        sessions: matrix.dates().len(),
        attendees: matrix.names().len(),
    };

    info!(
        "Built attendance matrix: {} attendees x {} sessions ({} files skipped)",
        metadata.attendees, metadata.sessions, metadata.files_skipped
    );
    for (row, name) in matrix.names().iter().enumerate() {
        debug!(
            "{}: attended {} of {} sessions",
            name,
            matrix.attendance_count(row),
            metadata.sessions
        );
    }

    Some(AttendanceReport { matrix, metadata })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
