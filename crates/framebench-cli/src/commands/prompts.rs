//! Prompts command - per-metric breakdown for each number of prompts.

use anyhow::Result;
use clap::Args;
use framebench_core::io::{self, ExportFormat, Report};
use framebench_core::report::condition_breakdown;
use framebench_core::{aggregate, AggregateRow, GroupBy, Metric, ReportConfig, ReportTable};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::output::{self, CommandOutput};

/// Arguments for the prompts command.
#[derive(Args, Debug)]
pub struct PromptsArgs {
    /// Results file (newline-delimited JSON)
    #[arg(short, long, env = "FRAMEBENCH_RESULTS")]
    pub input: Option<PathBuf>,

    /// Metric to include (repeatable; defaults to the configured metrics)
    #[arg(long = "metric")]
    pub metrics: Vec<Metric>,

    /// Export format (md, html, json) instead of printing
    #[arg(short, long)]
    pub export: Option<ExportFormat>,

    /// Directory for exported files
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One prompt count's breakdown in JSON output.
#[derive(Debug, Serialize)]
pub struct PromptBreakdown<'a> {
    pub num_prompts: Option<u64>,
    pub title: &'a str,
    pub condition: &'a AggregateRow,
}

/// Execute the prompts command.
pub fn execute(args: PromptsArgs, config: &ReportConfig, json: bool) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.input.clone());
    let Some(loaded) = super::load_input(&input, json)? else {
        return Ok(());
    };

    let metrics = if args.metrics.is_empty() {
        config.metrics.clone()
    } else {
        args.metrics
    };

    let table = aggregate(&loaded.records, GroupBy::NumPrompts);
    let prompt_counts: Vec<u64> = table.rows.iter().filter_map(|row| row.key.num_prompts).collect();
    info!(?prompt_counts, "Found num_prompts values");

    let breakdowns: Vec<ReportTable> = table
        .rows
        .iter()
        .map(|row| condition_breakdown(row, &config.frameworks, &metrics))
        .collect();

    if let Some(format) = args.export {
        let output_dir = args.output.unwrap_or_else(|| config.output_dir.clone());
        let reports: Vec<Report<'_, AggregateRow>> = table
            .rows
            .iter()
            .zip(&breakdowns)
            .map(|(row, breakdown)| Report {
                title: &breakdown.title,
                file_stem: io::prompts_file_stem(row.key.num_prompts.unwrap_or_default()),
                tables: std::slice::from_ref(breakdown),
                data: row,
            })
            .collect();
        return super::export_all(&reports, format, &output_dir, json);
    }

    if json {
        let data: Vec<PromptBreakdown<'_>> = table
            .rows
            .iter()
            .zip(&breakdowns)
            .map(|(row, breakdown)| PromptBreakdown {
                num_prompts: row.key.num_prompts,
                title: &breakdown.title,
                condition: row,
            })
            .collect();
        output::json(&CommandOutput::data(data))?;
    } else {
        output::info(&format!(
            "Found the following num_prompts values: {}",
            prompt_counts
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));
        for breakdown in &breakdowns {
            output::report_table(breakdown);
        }
    }

    Ok(())
}
