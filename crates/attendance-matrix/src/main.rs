mod bootstrap;

use std::path::PathBuf;

use anyhow::Result;
use attendance_core::error::AttendanceError;
use attendance_core::settings::Settings;
use attendance_data::pipeline::build_report;
use attendance_report::write_reports;

/// How a run ended, when it did not fail.
#[derive(Debug, PartialEq, Eq)]
enum RunOutcome {
    /// Reports were written to these paths.
    Written(Vec<PathBuf>),
    /// The input directory held no session files.
    NoInput,
    /// Files were found but none produced a session.
    NothingToReport,
}

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Attendance matrix v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, output: {}, formats: {:?}",
        settings.input_dir.display(),
        settings.output_dir.display(),
        settings.formats
    );

    if let RunOutcome::Written(paths) = run(&settings)? {
        println!("{}", settings.locale.reports_saved());
        for path in paths {
            println!("- {}", path.display());
        }
    }

    Ok(())
}

/// Build the report described by `settings` and write it out.
///
/// Missing input is a clean early exit, not an error.
fn run(settings: &Settings) -> Result<RunOutcome> {
    let output = settings.output_config()?;
    let locale = settings.locale;

    let report = match build_report(&settings.pipeline_config()) {
        Ok(Some(report)) => report,
        Ok(None) => {
            tracing::warn!("{}", locale.nothing_to_report());
            return Ok(RunOutcome::NothingToReport);
        }
        Err(AttendanceError::NoInputFound(dir)) => {
            tracing::error!("{}", locale.no_input(&dir));
            return Ok(RunOutcome::NoInput);
        }
        Err(e) => return Err(e.into()),
    };

    let paths = write_reports(&output, &report)?;
    Ok(RunOutcome::Written(paths))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn settings_for(input: &Path, output: &Path, extra: &[&str]) -> Settings {
        let mut args = vec![
            "attendance-matrix".to_string(),
            "--input-dir".to_string(),
            input.display().to_string(),
            "--output-dir".to_string(),
            output.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Settings::load_from_args(args)
    }

    #[test]
    fn test_run_writes_default_reports() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(
            input.path().join("session.csv"),
            "\u{feff}Topic,Start\nLecture,\"Jan 5, 2024 10:00 AM\"\nParticipants\nAlice,a@x\n",
        )
        .unwrap();

        let outcome = run(&settings_for(input.path(), output.path(), &[])).unwrap();

        let expected = vec![
            output.path().join("full_report.csv"),
            output.path().join("full_report.xlsx"),
        ];
        assert_eq!(outcome, RunOutcome::Written(expected));
        let csv = std::fs::read_to_string(output.path().join("full_report.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["\u{feff}Name,05.01.2024", "Alice,1"]);
    }

    #[test]
    fn test_run_without_input_files_writes_nothing() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let out_dir = output.path().join("reports");

        let outcome = run(&settings_for(input.path(), &out_dir, &[])).unwrap();

        assert_eq!(outcome, RunOutcome::NoInput);
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_run_with_only_unusable_files_writes_nothing() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let out_dir = output.path().join("reports");
        std::fs::write(input.path().join("a.csv"), "no date\n").unwrap();

        let outcome = run(&settings_for(input.path(), &out_dir, &["--locale", "ru"])).unwrap();

        assert_eq!(outcome, RunOutcome::NothingToReport);
        assert!(!out_dir.exists());
    }
}
