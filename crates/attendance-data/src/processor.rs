//! Per-file orchestration of date and attendee extraction.
//!
//! Every file is handled in isolation: any failure excludes that file only,
//! and is reported through `tracing` in the configured language.

use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use attendance_core::error::{AttendanceError, Result};
use attendance_core::messages::Locale;
use attendance_core::models::{SessionMap, SessionRecord};
use attendance_core::settings::DuplicatePolicy;
use tracing::{debug, warn};

use crate::attendees::{extract_attendees, table_body};
use crate::date::extract_session_date;
use crate::reader::read_session_file;

// ── Public types ──────────────────────────────────────────────────────────────

/// A file that contributed nothing, with the reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: AttendanceError,
}

/// Result of processing a batch of session files.
#[derive(Debug, Default)]
pub struct ProcessingOutcome {
    /// Attendee sets by session date.
    pub sessions: SessionMap,
    /// Files whose record was accepted, in processing order.
    pub processed: Vec<PathBuf>,
    /// Files that were excluded.
    pub skipped: Vec<SkippedFile>,
}

impl ProcessingOutcome {
    /// `true` when no file yielded a session.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

// ── SessionProcessor ──────────────────────────────────────────────────────────

/// Turns session export files into a date → attendees mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionProcessor {
    policy: DuplicatePolicy,
    locale: Locale,
}

impl SessionProcessor {
    pub fn new(policy: DuplicatePolicy, locale: Locale) -> Self {
        Self { policy, locale }
    }

    /// Process `paths` in the given order.
    pub fn process_paths(&self, paths: &[PathBuf]) -> ProcessingOutcome {
        let mut outcome = ProcessingOutcome::default();

        for path in paths {
            let result =
                read_session_file(path).and_then(|bytes| self.process_source(path, &bytes));
            match result {
                Ok(record) => self.accept(record, &mut outcome),
                Err(error) => self.skip(path, error, &mut outcome),
            }
        }

        debug!(
            "Processed {} files: {} accepted, {} skipped, {} sessions",
            paths.len(),
            outcome.processed.len(),
            outcome.skipped.len(),
            outcome.sessions.len()
        );

        outcome
    }

    /// Parse one in-memory export. `path` labels the record and any error.
    ///
    /// The attendee table is only read once a date has been found.
    pub fn process_source(&self, path: &Path, bytes: &[u8]) -> Result<SessionRecord> {
        let date = extract_session_date(bytes, path)?;

        let content = std::str::from_utf8(bytes).map_err(|e| AttendanceError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        let attendees = extract_attendees(table_body(content), path)?;

        debug!(
            "File {}: session {} with {} attendees",
            path.display(),
            date,
            attendees.len()
        );

        Ok(SessionRecord {
            date,
            attendees,
            source: path.to_path_buf(),
        })
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Store `record` according to the duplicate-date policy.
    fn accept(&self, record: SessionRecord, outcome: &mut ProcessingOutcome) {
        match outcome.sessions.entry(record.date) {
            Entry::Vacant(slot) => {
                slot.insert(record.attendees);
            }
            Entry::Occupied(mut slot) => match self.policy {
                DuplicatePolicy::Replace => {
                    debug!(
                        "Session {} from {} replaces an earlier file",
                        record.date,
                        record.source.display()
                    );
                    slot.insert(record.attendees);
                }
                DuplicatePolicy::Merge => {
                    slot.get_mut().extend(record.attendees);
                }
                DuplicatePolicy::Reject => {
                    let error = AttendanceError::DuplicateSession {
                        path: record.source.clone(),
                        date: record.date,
                    };
                    self.skip(&record.source, error, outcome);
                    return;
                }
            },
        }
        outcome.processed.push(record.source);
    }

    fn skip(&self, path: &Path, error: AttendanceError, outcome: &mut ProcessingOutcome) {
        debug_assert!(error.is_per_file(), "run-level error reached skip: {error}");
        warn!("{}", self.locale.describe_skip(&error));
        outcome.skipped.push(SkippedFile {
            path: path.to_path_buf(),
            error,
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
