//! CLI commands module.

pub mod completions;
pub mod config;
pub mod index;
pub mod prompts;
pub mod summary;

use anyhow::{Context, Result};
use chrono::Utc;
use framebench_core::io::{self, ExportFormat, Report};
use framebench_core::{load_file, LoadedRecords};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::output::{self, OutputFormat};

/// Load the results file, reporting skipped lines.
///
/// Returns `None` (after telling the user) when no record could be loaded.
/// Under `--json` that notice is the command's JSON output.
pub(crate) fn load_input(path: &Path, json: bool) -> Result<Option<LoadedRecords>> {
    if !path.exists() {
        anyhow::bail!(
            "File '{}' not found. Please ensure it exists or pass --input.",
            path.display()
        );
    }

    let loaded =
        load_file(path).with_context(|| format!("Failed to load {}", path.display()))?;

    info!(
        path = %path.display(),
        records = loaded.records.len(),
        skipped = loaded.skipped.len(),
        "Data loaded"
    );

    if !loaded.skipped.is_empty() && !json {
        output::warning(&format!(
            "Skipped {} malformed line(s) in {}",
            loaded.skipped.len(),
            path.display()
        ));
    }

    if loaded.is_empty() {
        let message = format!("No data loaded. Please check your '{}' file.", path.display());
        if json {
            output::CommandOutput::<()>::message(message).emit(OutputFormat::Json)?;
        } else {
            output::warning(&message);
        }
        return Ok(None);
    }

    Ok(Some(loaded))
}

/// Outcome of one file export.
#[derive(Debug, Serialize)]
pub(crate) struct ExportedFile {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Export every report, continuing past individual failures.
pub(crate) fn export_all<T: Serialize>(
    reports: &[Report<'_, T>],
    format: ExportFormat,
    output_dir: &Path,
    json: bool,
) -> Result<()> {
    let generated_at = Utc::now();
    let mut exported = Vec::with_capacity(reports.len());

    for report in reports {
        match io::export(report, format, output_dir, generated_at) {
            Ok(path) => {
                if !json {
                    output::success(&format!(
                        "{} exported to {}",
                        report.title,
                        path.display()
                    ));
                }
                exported.push(ExportedFile {
                    title: report.title.to_string(),
                    path: Some(path.display().to_string()),
                    error: None,
                });
            }
            Err(e) => {
                if !json {
                    output::error(&format!(
                        "Failed to export {} as {}: {}",
                        report.title, format, e
                    ));
                }
                exported.push(ExportedFile {
                    title: report.title.to_string(),
                    path: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    if json {
        output::json(&output::CommandOutput::data(exported))?;
    }

    Ok(())
}
