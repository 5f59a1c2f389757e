use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

use crate::error::{AttendanceError, Result};
use crate::messages::Locale;

// ── Enumerations ──────────────────────────────────────────────────────────────

/// Output formats the report can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ReportFormat {
    /// Comma-separated text, UTF-8 with a byte-order mark.
    Csv,
    /// Excel workbook.
    Xlsx,
    /// Pretty-printed JSON document.
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// What happens when two input files resolve to the same session date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DuplicatePolicy {
    /// The file processed later replaces the earlier attendee set.
    #[default]
    Replace,
    /// Attendee sets of all files for that date are united.
    Merge,
    /// The later file is skipped with a diagnostic; the first set is kept.
    Reject,
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Build an attendance matrix from video-conference participant exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "attendance-matrix",
    about = "Build an attendance matrix from video-conference participant exports",
    version
)]
pub struct Settings {
    /// Directory containing the per-session CSV exports
    #[arg(long, env = "ATTENDANCE_INPUT_DIR", default_value = "logs")]
    pub input_dir: PathBuf,

    /// Directory the reports are written to
    #[arg(long, env = "ATTENDANCE_OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// File name of the CSV report
    #[arg(long, env = "ATTENDANCE_OUTPUT_CSV_FILE", default_value = "full_report.csv")]
    pub output_csv_file: String,

    /// File name of the XLSX report
    #[arg(long, env = "ATTENDANCE_OUTPUT_XLSX_FILE", default_value = "full_report.xlsx")]
    pub output_xlsx_file: String,

    /// File name of the JSON report
    #[arg(long, env = "ATTENDANCE_OUTPUT_JSON_FILE", default_value = "full_report.json")]
    pub output_json_file: String,

    /// Report formats to write (comma-separated)
    #[arg(
        long = "format",
        env = "ATTENDANCE_FORMATS",
        value_enum,
        value_delimiter = ',',
        default_values_t = [ReportFormat::Csv, ReportFormat::Xlsx]
    )]
    pub formats: Vec<ReportFormat>,

    /// Language of diagnostic messages
    #[arg(long, env = "ATTENDANCE_LOCALE", value_enum, default_value = "en")]
    pub locale: Locale,

    /// Policy for several files sharing one session date
    #[arg(long, env = "ATTENDANCE_DUPLICATE_DATES", value_enum, default_value = "replace")]
    pub duplicate_dates: DuplicatePolicy,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Pipeline values ────────────────────────────────────────────────────────────

/// Everything the ingestion pipeline needs, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub duplicate_policy: DuplicatePolicy,
    pub locale: Locale,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            duplicate_policy: DuplicatePolicy::default(),
            locale: Locale::default(),
        }
    }
}

/// Where and how reports are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    /// Formats in the order they are written, without repeats.
    pub formats: Vec<ReportFormat>,
    pub csv_file: String,
    pub xlsx_file: String,
    pub json_file: String,
}

impl OutputConfig {
    /// Full path of the report file for `format`.
    pub fn path_for(&self, format: ReportFormat) -> PathBuf {
        self.output_dir.join(self.file_name(format))
    }

    fn file_name(&self, format: ReportFormat) -> &str {
        match format {
            ReportFormat::Csv => &self.csv_file,
            ReportFormat::Xlsx => &self.xlsx_file,
            ReportFormat::Json => &self.json_file,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            formats: vec![ReportFormat::Csv, ReportFormat::Xlsx],
            csv_file: "full_report.csv".to_string(),
            xlsx_file: "full_report.xlsx".to_string(),
            json_file: "full_report.json".to_string(),
        }
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and environment, then apply `--debug`.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            input_dir: self.input_dir.clone(),
            duplicate_policy: self.duplicate_dates,
            locale: self.locale,
        }
    }

    /// Validate the output options and collapse repeated formats.
    pub fn output_config(&self) -> Result<OutputConfig> {
        let mut formats: Vec<ReportFormat> = Vec::new();
        for format in &self.formats {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        if formats.is_empty() {
            return Err(AttendanceError::Config(
                "at least one report format is required".to_string(),
            ));
        }

        let config = OutputConfig {
            output_dir: self.output_dir.clone(),
            formats,
            csv_file: self.output_csv_file.clone(),
            xlsx_file: self.output_xlsx_file.clone(),
            json_file: self.output_json_file.clone(),
        };

        for format in &config.formats {
            if config.file_name(*format).trim().is_empty() {
                return Err(AttendanceError::Config(format!(
                    "output file name for {format} report is empty"
                )));
            }
        }

        Ok(config)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
