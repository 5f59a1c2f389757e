//! Data ingestion layer for the attendance matrix builder.
//!
//! Responsible for discovering per-session participant exports, recovering
//! each session's date and attendee list, and merging them into a single
//! attendance matrix.

pub mod attendees;
pub mod date;
pub mod matrix;
pub mod pipeline;
pub mod processor;
pub mod reader;

pub use attendance_core as core;
