//! Session export discovery and loading.
//!
//! Lists the per-session CSV exports in the input directory and reads each
//! one into memory for the extractors.

use std::path::{Path, PathBuf};

use attendance_core::error::{AttendanceError, Result};
use tracing::warn;

/// UTF-8 byte-order mark as it appears at the start of exported files.
pub const UTF8_BOM: &str = "\u{feff}";

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.csv` files directly inside `input_dir`, sorted by path.
///
/// Subdirectories are not descended into. A missing directory yields an empty
/// list.
pub fn find_session_files(input_dir: &Path) -> Vec<PathBuf> {
    if !input_dir.exists() {
        warn!("Input directory does not exist: {}", input_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Read the raw bytes of one session export.
pub fn read_session_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| AttendanceError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Drop a leading byte-order mark, if present.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(UTF8_BOM).unwrap_or(text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "x").unwrap();
        path
    }

    #[test]
    fn test_find_session_files_in_flat_dir() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.csv");
        touch(dir.path(), "b.csv");
        touch(dir.path(), "notes.txt");

        let files = find_session_files(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "csv"));
    }

    #[test]
    fn test_find_session_files_not_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("archive");
        std::fs::create_dir_all(&sub).unwrap();
        touch(dir.path(), "root.csv");
        touch(&sub, "nested.csv");

        let files = find_session_files(dir.path());
        assert_eq!(files, vec![dir.path().join("root.csv")]);
    }

    #[test]
    fn test_find_session_files_extension_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "UPPER.CSV");

        let files = find_session_files(dir.path());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_find_session_files_nonexistent_path() {
        let files = find_session_files(Path::new("/tmp/does-not-exist-attendance-test-xyz"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_session_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "c.csv");
        touch(dir.path(), "a.csv");
        touch(dir.path(), "b.csv");

        let files = find_session_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.csv"]);
    }

    #[test]
    fn test_read_session_file_missing() {
        let dir = TempDir::new().unwrap();
        let err = read_session_file(&dir.path().join("gone.csv")).unwrap_err();
        assert!(matches!(err, AttendanceError::FileRead { .. }));
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}Meeting"), "Meeting");
        assert_eq!(strip_bom("Meeting"), "Meeting");
    }
}
