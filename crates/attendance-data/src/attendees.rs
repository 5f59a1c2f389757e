//! Attendee list extraction and name normalization.
//!
//! After a fixed header block the export is a CSV table whose first column is
//! the participant's display name. Names are cleaned of guest markers and
//! decoration, then deduplicated.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use attendance_core::error::{AttendanceError, Result};
use attendance_core::models::AttendeeIdentity;
use regex::Regex;

use crate::reader::strip_bom;

/// Number of physical lines preceding the attendee table.
pub const HEADER_LINES: usize = 3;

fn guest_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\s*\(Guest\).*").expect("regex is valid"))
}

/// Cell values that mean "no value" in spreadsheet-style exports.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_decoration(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '(' | ')')
}

/// Normalize one raw display name.
///
/// Everything from a literal `(Guest)` marker onwards is removed, then
/// whitespace, `"`, `(` and `)` are trimmed from both ends. Returns `None`
/// when nothing is left, or when the raw cell is exactly a missing-value
/// marker such as `N/A` or `null`.
pub fn normalize_name(raw: &str) -> Option<AttendeeIdentity> {
    if MISSING_MARKERS.contains(&raw) {
        return None;
    }
    let without_marker = guest_pattern().replace(raw, "");
    AttendeeIdentity::new(without_marker.trim_matches(is_decoration))
}

/// Return the part of `content` after the header block.
///
/// A leading byte-order mark is ignored. Content with fewer lines than the
/// header yields an empty body.
pub fn table_body(content: &str) -> &str {
    let mut rest = strip_bom(content);
    for _ in 0..HEADER_LINES {
        match rest.find('\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return "",
        }
    }
    rest
}

/// Collect the distinct attendees listed in the first column of `body`.
///
/// Rows may have any number of fields; only the first is read. A table with
/// no rows at all rejects the whole file.
pub fn extract_attendees(body: &str, path: &Path) -> Result<BTreeSet<AttendeeIdentity>> {
    let table_error = |reason: String| AttendanceError::TableParse {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut attendees = BTreeSet::new();
    let mut rows = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| table_error(e.to_string()))?;
        rows += 1;
        if let Some(identity) = record.get(0).and_then(normalize_name) {
            attendees.insert(identity);
        }
    }

    if rows == 0 {
        return Err(table_error("attendee table is empty".to_string()));
    }

    Ok(attendees)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
