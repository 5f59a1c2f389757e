//! Session date recovery from the free-form header of an export.
//!
//! The header carries the meeting start as e.g. `"Jan 5, 2024 10:00 AM"`.
//! Only the first line holding such a token is consulted.

use std::io::BufRead;
use std::path::Path;
use std::sync::OnceLock;

use attendance_core::error::{AttendanceError, Result};
use attendance_core::models::SessionDate;
use chrono::NaiveDate;
use regex::Regex;

use crate::reader::strip_bom;

/// `strftime` layout of a token once its comma has been removed.
const TOKEN_FORMAT: &str = "%b %d %Y";

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?:"|\b)([A-Za-z]{3} \d{1,2},? \d{4})\b"#).expect("regex is valid")
    })
}

/// Return the first date-like token in `line`, if any.
pub fn find_date_token(line: &str) -> Option<&str> {
    date_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a token such as `"Jan 5, 2024"` or `"Jan 5 2024"`.
pub fn parse_date_token(token: &str) -> Option<SessionDate> {
    let cleaned = token.replace(',', "");
    NaiveDate::parse_from_str(cleaned.trim(), TOKEN_FORMAT)
        .ok()
        .map(SessionDate::new)
}

/// Scan `reader` line by line and parse the first date token found.
///
/// `path` only labels the errors:
/// * no token anywhere → [`AttendanceError::DateNotFound`]
/// * first token is not a real date → [`AttendanceError::MalformedDate`]
/// * unreadable line before the token → [`AttendanceError::FileRead`]
pub fn extract_session_date<R: BufRead>(reader: R, path: &Path) -> Result<SessionDate> {
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| AttendanceError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let line = if index == 0 {
            strip_bom(&line)
        } else {
            line.as_str()
        };

        if let Some(token) = find_date_token(line) {
            return parse_date_token(token).ok_or_else(|| AttendanceError::MalformedDate {
                path: path.to_path_buf(),
                token: token.to_string(),
            });
        }
    }

    Err(AttendanceError::DateNotFound {
        path: path.to_path_buf(),
    })
}

/// Text-level variant of [`extract_session_date`]: `None` when no usable
/// date is present.
pub fn find_session_date(text: &str) -> Option<SessionDate> {
    extract_session_date(text.as_bytes(), Path::new("")).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_5() -> SessionDate {
        SessionDate::from_ymd(2024, 1, 5).unwrap()
    }

    #[test]
    fn test_comma_and_no_comma_forms_agree() {
        assert_eq!(parse_date_token("Jan 5, 2024"), Some(jan_5()));
        assert_eq!(parse_date_token("Jan 5 2024"), Some(jan_5()));
        assert_eq!(parse_date_token("Jan 05, 2024"), Some(jan_5()));
        assert_eq!(jan_5().to_string(), "05.01.2024");
    }

    #[test]
    fn test_month_abbreviation_case_insensitive() {
        assert_eq!(parse_date_token("JAN 5 2024"), Some(jan_5()));
    }

    #[test]
    fn test_find_date_token_inside_quoted_header() {
        let line = r#""Team sync","123 456 789","Jan 5, 2024 10:00 AM","Jan 5, 2024 11:00 AM""#;
        assert_eq!(find_date_token(line), Some("Jan 5, 2024"));
    }

    #[test]
    fn test_find_date_token_requires_word_boundary() {
        assert_eq!(find_date_token("xJan 5 2024"), None);
        assert_eq!(find_date_token("Jan 5 20245"), None);
    }

    #[test]
    fn test_extract_from_header_lines() {
        let text = "Meeting ID,Topic,Start Time\n\
                    123,Weekly,\"Feb 10 2024 09:00\"\n\
                    \n\
                    Name,Email,Duration\n";
        let date = extract_session_date(text.as_bytes(), Path::new("s.csv")).unwrap();
        assert_eq!(date, SessionDate::from_ymd(2024, 2, 10).unwrap());
    }

    #[test]
    fn test_bom_on_first_line() {
        let text = "\u{feff}Jan 5, 2024\n";
        assert_eq!(find_session_date(text), Some(jan_5()));
    }

    #[test]
    fn test_only_first_matching_line_is_used() {
        let text = "Start: Mar 1, 2024\nEnd: Mar 2, 2024\n";
        assert_eq!(
            find_session_date(text),
            SessionDate::from_ymd(2024, 3, 1)
        );
    }

    #[test]
    fn test_malformed_first_token_is_not_retried() {
        let text = "Foo 5 2024\nJan 5 2024\n";
        let err = extract_session_date(text.as_bytes(), Path::new("bad.csv")).unwrap_err();
        match err {
            AttendanceError::MalformedDate { token, .. } => assert_eq!(token, "Foo 5 2024"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_impossible_calendar_date() {
        assert_eq!(parse_date_token("Feb 30, 2024"), None);
    }

    #[test]
    fn test_no_date_yields_not_found() {
        let text = "Name,Email\nAlice,alice@example.com\n";
        let err = extract_session_date(text.as_bytes(), Path::new("n.csv")).unwrap_err();
        assert!(matches!(err, AttendanceError::DateNotFound { .. }));
        assert_eq!(find_session_date(text), None);
    }

    #[test]
    fn test_invalid_utf8_before_date_is_read_error() {
        let bytes: &[u8] = b"\xff\xfe garbage\nJan 5 2024\n";
        let err = extract_session_date(bytes, Path::new("bin.csv")).unwrap_err();
        assert!(matches!(err, AttendanceError::FileRead { .. }));
    }

    #[test]
    fn test_invalid_utf8_after_date_is_ignored() {
        let bytes: &[u8] = b"Jan 5 2024\n\xff\xfe\n";
        let date = extract_session_date(bytes, Path::new("ok.csv")).unwrap();
        assert_eq!(date, jan_5());
    }
}
