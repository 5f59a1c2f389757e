//! Human-readable diagnostics in the configured language.
//!
//! Error values keep their English `Display`; this module renders the
//! operator-facing text that is logged when a file is skipped or a run ends
//! early.

use std::path::Path;

use crate::error::AttendanceError;

/// Language of the operator-facing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

/// Base name of `path`, falling back to the full path.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl Locale {
    /// Describe why a file was excluded from the report.
    pub fn describe_skip(&self, err: &AttendanceError) -> String {
        let file = err.path().map(file_label).unwrap_or_default();
        match (self, err) {
            (Locale::En, AttendanceError::DateNotFound { .. }) => {
                format!("Date not found: {file}")
            }
            (Locale::Ru, AttendanceError::DateNotFound { .. }) => {
                format!("Дата не найдена: {file}")
            }
            (Locale::En, AttendanceError::MalformedDate { token, .. }) => {
                format!("Error: {file} - invalid date \"{token}\"")
            }
            (Locale::Ru, AttendanceError::MalformedDate { token, .. }) => {
                format!("Ошибка: {file} - некорректная дата \"{token}\"")
            }
            (Locale::En, AttendanceError::FileRead { source, .. }) => {
                format!("Error: {file} - {source}")
            }
            (Locale::Ru, AttendanceError::FileRead { source, .. }) => {
                format!("Ошибка: {file} - {source}")
            }
            (Locale::En, AttendanceError::TableParse { reason, .. }) => {
                format!("Error processing {file}: {reason}")
            }
            (Locale::Ru, AttendanceError::TableParse { reason, .. }) => {
                format!("Ошибка обработки {file}: {reason}")
            }
            (Locale::En, AttendanceError::DuplicateSession { date, .. }) => {
                format!("Skipping {file}: session {date} already recorded")
            }
            (Locale::Ru, AttendanceError::DuplicateSession { date, .. }) => {
                format!("Пропуск {file}: занятие {date} уже учтено")
            }
            (Locale::En, other) => format!("Error: {other}"),
            (Locale::Ru, other) => format!("Ошибка: {other}"),
        }
    }

    /// The input directory contained no session files.
    pub fn no_input(&self, dir: &Path) -> String {
        match self {
            Locale::En => format!("No CSV files found in: {}", dir.display()),
            Locale::Ru => format!("CSV файлы не найдены в: {}", dir.display()),
        }
    }

    /// Files were found but none produced a session.
    pub fn nothing_to_report(&self) -> String {
        match self {
            Locale::En => "No sessions could be read; no report written".to_string(),
            Locale::Ru => "Не удалось прочитать ни одного занятия; отчёт не создан".to_string(),
        }
    }

    /// Heading printed above the list of written report files.
    pub fn reports_saved(&self) -> &'static str {
        match self {
            Locale::En => "Reports saved:",
            Locale::Ru => "Отчёты сохранены:",
        }
    }
}
