//! Terminal and JSON output for the CLI.
//!
//! Notices about the run (loaded files, skipped lines, exported paths) are
//! kept apart from the report itself: warnings and errors go to stderr so a
//! piped report stays clean.

use colored::{ColoredString, Colorize};
use framebench_core::ReportTable;
use serde::Serialize;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Pick the format from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Kind of one-line notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Something was written or updated.
    Done,
    /// The command could not do what was asked.
    Failed,
    /// Data was dropped or missing.
    Warning,
    /// Progress information.
    Info,
}

impl Notice {
    fn marker(self) -> ColoredString {
        match self {
            Self::Done => "✓".green().bold(),
            Self::Failed => "✗".red().bold(),
            Self::Warning => "⚠".yellow().bold(),
            Self::Info => "ℹ".blue().bold(),
        }
    }

    fn goes_to_stderr(self) -> bool {
        matches!(self, Self::Failed | Self::Warning)
    }
}

/// Print a notice line.
pub fn notice(kind: Notice, message: &str) {
    let marker = kind.marker();
    if kind.goes_to_stderr() {
        eprintln!("{marker} {message}");
    } else {
        println!("{marker} {message}");
    }
}

pub fn success(message: &str) {
    notice(Notice::Done, message);
}

pub fn error(message: &str) {
    notice(Notice::Failed, message);
}

pub fn warning(message: &str) {
    notice(Notice::Warning, message);
}

pub fn info(message: &str) {
    notice(Notice::Info, message);
}

/// Print an indented `key: value` line.
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {value}", key.bold());
}

/// Print a section heading.
pub fn section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Print a path with a found/missing dot.
pub fn status(label: &str, found: bool) {
    let dot = if found { "●".green() } else { "●".red() };
    println!("  {dot} {label}");
}

/// Print a value as pretty JSON on stdout.
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a report table with rounded borders.
pub fn render_report_table(table: &ReportTable) -> String {
    use tabled::{builder::Builder, settings::Style};

    if table.is_empty() {
        return "  (no data)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().cloned());
    for row in &table.rows {
        builder.push_record(row.iter().cloned());
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Print a report table under its title.
pub fn report_table(table: &ReportTable) {
    section(&table.title);
    println!("{}", render_report_table(table));
}

/// JSON envelope printed by every command under `--json`.
#[derive(Debug, Serialize)]
pub struct CommandOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Successful run carrying data.
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::empty(true)
        }
    }

    /// Successful run with nothing but a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::empty(true)
        }
    }

    /// Run that could not complete.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::empty(false)
        }
    }

    fn empty(success: bool) -> Self {
        Self {
            success,
            data: None,
            error: None,
            message: None,
        }
    }

    /// Print as JSON, or as notices in text mode. Text mode never prints `data`.
    pub fn emit(&self, format: OutputFormat) -> anyhow::Result<()> {
        if format == OutputFormat::Json {
            return json(self);
        }

        if let Some(err) = &self.error {
            error(err);
        }
        if let Some(msg) = &self.message {
            let kind = if self.success { Notice::Done } else { Notice::Failed };
            notice(kind, msg);
        }
        Ok(())
    }
}
