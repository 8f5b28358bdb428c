//! Index command - regenerate the benchmark directory index page.

use anyhow::{Context, Result};
use clap::Args;
use framebench_core::index::{update_index, INDEX_FILE};
use framebench_core::ReportConfig;
use serde::Serialize;
use std::path::PathBuf;

use crate::output::{self, CommandOutput, OutputFormat};

/// Arguments for the index command.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Directory containing benchmark directories (defaults to the configured target)
    pub dir: Option<PathBuf>,

    /// Page title
    #[arg(short, long)]
    pub title: Option<String>,
}

/// Index update output.
#[derive(Debug, Serialize)]
pub struct IndexOutput {
    pub path: String,
    pub entries: usize,
}

/// Execute the index command.
pub fn execute(args: IndexArgs, config: &ReportConfig, json: bool) -> Result<()> {
    let format = OutputFormat::from_json_flag(json);

    let mut index_config = config.index.clone();
    if let Some(dir) = args.dir {
        index_config.target_dir = dir;
    }
    if let Some(title) = args.title {
        index_config.title = title;
    }

    let entries = update_index(&index_config).with_context(|| {
        format!(
            "Failed to update index in {}",
            index_config.target_dir.display()
        )
    })?;

    if entries == 0 {
        let result: CommandOutput<()> =
            CommandOutput::message("No benchmark directories found. Exiting.");
        return match format {
            OutputFormat::Json => result.emit(format),
            OutputFormat::Text => {
                output::warning("No benchmark directories found. Exiting.");
                Ok(())
            }
        };
    }

    let path = index_config.target_dir.join(INDEX_FILE);
    match format {
        OutputFormat::Json => {
            CommandOutput::data(IndexOutput {
                path: path.display().to_string(),
                entries,
            })
            .emit(format)?;
        }
        OutputFormat::Text => {
            output::success(&format!(
                "Updated '{}' with {} benchmark entries.",
                path.display(),
                entries
            ));
        }
    }

    Ok(())
}
