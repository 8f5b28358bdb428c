//! File export of rendered reports.

use crate::error::{ReportError, ReportResult};
use crate::record::Metric;
use crate::report::ReportTable;
use crate::{html, markdown};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Report export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Markdown document.
    Markdown,
    /// Standalone HTML document wrapped for Jekyll.
    Html,
    /// Pretty-printed JSON.
    Json,
}

impl ExportFormat {
    /// File extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unsupported export format '{other}' (expected md, html or json)"
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// JSON export document.
#[derive(Debug, Serialize)]
struct JsonReport<'a, T: Serialize> {
    title: &'a str,
    generated_at: DateTime<Utc>,
    tables: &'a [ReportTable],
    data: &'a T,
}

/// A report ready to be written.
#[derive(Debug)]
pub struct Report<'a, T: Serialize> {
    /// Document title.
    pub title: &'a str,
    /// File name without extension.
    pub file_stem: String,
    /// Tables in the document.
    pub tables: &'a [ReportTable],
    /// Structured data included in JSON exports.
    pub data: &'a T,
}

/// Render a report in the given format.
pub fn render<T: Serialize>(
    report: &Report<'_, T>,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> ReportResult<String> {
    match format {
        ExportFormat::Markdown => Ok(markdown::generate_report(
            report.title,
            report.tables,
            generated_at,
        )),
        ExportFormat::Html => Ok(html::render_document(report.title, report.tables)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&JsonReport {
            title: report.title,
            generated_at,
            tables: report.tables,
            data: report.data,
        })?),
    }
}

/// Write a report to `{output_dir}/{file_stem}.{ext}` and return the path.
pub fn export<T: Serialize>(
    report: &Report<'_, T>,
    format: ExportFormat,
    output_dir: &Path,
    generated_at: DateTime<Utc>,
) -> ReportResult<PathBuf> {
    ensure_output_dir(output_dir)?;

    let filename = format!(
        "{}.{}",
        sanitize_filename(&report.file_stem),
        format.extension()
    );
    let path = output_dir.join(filename);

    let content = render(report, format, generated_at)?;
    fs::write(&path, content).map_err(|e| ReportError::io(&path, e))?;

    info!(path = %path.display(), %format, "Exported report");
    Ok(path)
}

/// File stem of a metric summary export.
pub fn summary_file_stem(metric: Metric) -> String {
    format!("summary_{}", metric.field_name())
}

/// File stem of a per-prompt-count breakdown export.
pub fn prompts_file_stem(num_prompts: u64) -> String {
    format!("bar_chart_prompts_{num_prompts}")
}

/// Ensure the output directory exists.
pub fn ensure_output_dir(output_dir: &Path) -> ReportResult<()> {
    fs::create_dir_all(output_dir).map_err(|e| ReportError::io(output_dir, e))
}

/// Sanitize a string for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
