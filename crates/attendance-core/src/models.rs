use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Canonical textual format of a [`SessionDate`]: `DD.MM.YYYY`.
pub const SESSION_DATE_FORMAT: &str = "%d.%m.%Y";

/// Header of the first column of every rendered attendance table.
pub const NAME_COLUMN: &str = "Name";

// ── SessionDate ───────────────────────────────────────────────────────────────

/// Calendar date of one session, without a time component.
///
/// Ordering is chronological; [`fmt::Display`] renders the canonical
/// `DD.MM.YYYY` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionDate(NaiveDate);

impl SessionDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year, month and day. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl fmt::Display for SessionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(SESSION_DATE_FORMAT))
    }
}

impl Serialize for SessionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── AttendeeIdentity ──────────────────────────────────────────────────────────

/// A normalized, non-empty attendee display name.
///
/// Two identities are the same person iff their strings are equal. Ordering
/// is by Unicode code point.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AttendeeIdentity(String);

impl AttendeeIdentity {
    /// Wrap an already-normalized name. Returns `None` for an empty string.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttendeeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AttendeeIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── SessionRecord ─────────────────────────────────────────────────────────────

/// The complete result of parsing one session export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Date recovered from the file header.
    pub date: SessionDate,
    /// Distinct attendees of the session.
    pub attendees: BTreeSet<AttendeeIdentity>,
    /// File the record was read from.
    pub source: PathBuf,
}

/// Aggregated sessions keyed by date. Iteration is chronological.
pub type SessionMap = BTreeMap<SessionDate, BTreeSet<AttendeeIdentity>>;

// ── AttendanceMatrix ──────────────────────────────────────────────────────────

/// Dense people × dates presence table.
///
/// `cells[row][col]` is `1` when `names[row]` attended the session on
/// `dates[col]`, otherwise `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceMatrix {
    names: Vec<AttendeeIdentity>,
    dates: Vec<SessionDate>,
    cells: Vec<Vec<u8>>,
}

impl AttendanceMatrix {
    /// Assemble a matrix from sorted rows, sorted columns and a dense grid.
    ///
    /// `cells` must contain one row per name, each with one value per date.
    pub fn new(names: Vec<AttendeeIdentity>, dates: Vec<SessionDate>, cells: Vec<Vec<u8>>) -> Self {
        debug_assert_eq!(names.len(), cells.len());
        debug_assert!(cells.iter().all(|row| row.len() == dates.len()));
        Self {
            names,
            dates,
            cells,
        }
    }

    pub fn names(&self) -> &[AttendeeIdentity] {
        &self.names
    }

    pub fn dates(&self) -> &[SessionDate] {
        &self.dates
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.dates.is_empty()
    }

    /// Presence value at (`row`, `col`), or `None` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Whether `name` attended the session held on `date`.
    pub fn is_present(&self, name: &str, date: SessionDate) -> bool {
        let row = self.names.binary_search_by(|n| n.as_str().cmp(name));
        let col = self.dates.binary_search(&date);
        match (row, col) {
            (Ok(r), Ok(c)) => self.cells[r][c] == 1,
            _ => false,
        }
    }

    /// Number of sessions attended by the person in `row`.
    pub fn attendance_count(&self, row: usize) -> u32 {
        self.cells
            .get(row)
            .map(|r| r.iter().map(|&v| u32::from(v)).sum())
            .unwrap_or(0)
    }

    /// Header row: `Name` followed by every date in `DD.MM.YYYY` form.
    pub fn header(&self) -> Vec<String> {
        std::iter::once(NAME_COLUMN.to_string())
            .chain(self.dates.iter().map(|d| d.to_string()))
            .collect()
    }

    /// Iterate `(name, cells)` pairs in row order.
    pub fn rows(&self) -> impl Iterator<Item = (&AttendeeIdentity, &[u8])> {
        self.names
            .iter()
            .zip(self.cells.iter().map(|r| r.as_slice()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> AttendeeIdentity {
        AttendeeIdentity::new(name).unwrap()
    }

    fn sample_matrix() -> AttendanceMatrix {
        AttendanceMatrix::new(
            vec![identity("Alice"), identity("Bob")],
            vec![
                SessionDate::from_ymd(2024, 1, 5).unwrap(),
                SessionDate::from_ymd(2024, 2, 10).unwrap(),
            ],
            vec![vec![1, 0], vec![1, 1]],
        )
    }

    #[test]
    fn test_session_date_display_is_canonical() {
        let date = SessionDate::from_ymd(2024, 1, 5).unwrap();
        assert_eq!(date.to_string(), "05.01.2024");
    }

    #[test]
    fn test_session_date_orders_chronologically() {
        // Lexicographic order of the canonical text would put 10.01 before 05.02.
        let feb = SessionDate::from_ymd(2024, 2, 5).unwrap();
        let jan = SessionDate::from_ymd(2024, 1, 10).unwrap();
        assert!(jan < feb);
    }

    #[test]
    fn test_session_date_impossible() {
        assert!(SessionDate::from_ymd(2024, 2, 30).is_none());
    }

    #[test]
    fn test_attendee_identity_rejects_empty() {
        assert!(AttendeeIdentity::new("").is_none());
        assert_eq!(identity("Ана").as_str(), "Ана");
    }

    #[test]
    fn test_matrix_header() {
        let matrix = sample_matrix();
        assert_eq!(matrix.header(), vec!["Name", "05.01.2024", "10.02.2024"]);
    }

    #[test]
    fn test_matrix_is_present() {
        let matrix = sample_matrix();
        let jan = SessionDate::from_ymd(2024, 1, 5).unwrap();
        let feb = SessionDate::from_ymd(2024, 2, 10).unwrap();
        assert!(matrix.is_present("Alice", jan));
        assert!(!matrix.is_present("Alice", feb));
        assert!(!matrix.is_present("Zed", jan));
    }

    #[test]
    fn test_matrix_attendance_count() {
        let matrix = sample_matrix();
        assert_eq!(matrix.attendance_count(0), 1);
        assert_eq!(matrix.attendance_count(1), 2);
        assert_eq!(matrix.attendance_count(9), 0);
    }

    #[test]
    fn test_matrix_rows_and_cells() {
        let matrix = sample_matrix();
        let rows: Vec<(&str, Vec<u8>)> = matrix
            .rows()
            .map(|(n, c)| (n.as_str(), c.to_vec()))
            .collect();
        assert_eq!(rows, vec![("Alice", vec![1, 0]), ("Bob", vec![1, 1])]);
        assert_eq!(matrix.cell(1, 0), Some(1));
        assert_eq!(matrix.cell(2, 0), None);
    }
}
