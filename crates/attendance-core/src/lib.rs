//! Domain types, errors, diagnostics and settings for the attendance matrix
//! builder.

pub mod error;
pub mod messages;
pub mod models;
pub mod settings;

pub use error::{AttendanceError, Result};
pub use messages::Locale;
pub use models::{AttendanceMatrix, AttendeeIdentity, SessionDate, SessionMap, SessionRecord};
pub use settings::{DuplicatePolicy, OutputConfig, PipelineConfig, ReportFormat, Settings};
