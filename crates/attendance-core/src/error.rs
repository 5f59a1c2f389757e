use std::path::PathBuf;
use thiserror::Error;

use crate::models::SessionDate;

/// All errors produced while building an attendance report.
#[derive(Error, Debug)]
pub enum AttendanceError {
    /// No line of the file carries a recognizable date token.
    #[error("Date not found in {}", .path.display())]
    DateNotFound { path: PathBuf },

    /// A date-like token was found but is not a valid calendar date.
    #[error("Invalid date \"{token}\" in {}", .path.display())]
    MalformedDate { path: PathBuf, token: String },

    /// A file could not be opened, read, or decoded as UTF-8.
    #[error("Failed to read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The attendee table of a file is malformed.
    #[error("Failed to parse attendee table in {}: {reason}", .path.display())]
    TableParse { path: PathBuf, reason: String },

    /// A second file resolved to an already-recorded session date.
    #[error("Duplicate session date {date} in {}", .path.display())]
    DuplicateSession { path: PathBuf, date: SessionDate },

    /// The input directory holds no session files.
    #[error("No CSV files found in {}", .0.display())]
    NoInputFound(PathBuf),

    /// A report could not be written.
    #[error("Failed to write report {}: {reason}", .path.display())]
    Export { path: PathBuf, reason: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AttendanceError {
    /// `true` for errors that exclude a single file but never stop the run.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            AttendanceError::DateNotFound { .. }
                | AttendanceError::MalformedDate { .. }
                | AttendanceError::FileRead { .. }
                | AttendanceError::TableParse { .. }
                | AttendanceError::DuplicateSession { .. }
        )
    }

    /// The file an error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            AttendanceError::DateNotFound { path }
            | AttendanceError::MalformedDate { path, .. }
            | AttendanceError::FileRead { path, .. }
            | AttendanceError::TableParse { path, .. }
            | AttendanceError::DuplicateSession { path, .. }
            | AttendanceError::Export { path, .. }
            | AttendanceError::NoInputFound(path) => Some(path.as_path()),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the attendance crates.
pub type Result<T> = std::result::Result<T, AttendanceError>;
