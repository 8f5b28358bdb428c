//! Summary command - per-metric comparison of the two frameworks.

use anyhow::Result;
use clap::Args;
use framebench_core::io::{self, ExportFormat, Report};
use framebench_core::report::metric_summary;
use framebench_core::{
    aggregate, compare_metric, GroupBy, Metric, MetricComparisonRow, ReportConfig, ReportTable,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::output::{self, CommandOutput};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Results file (newline-delimited JSON)
    #[arg(short, long, env = "FRAMEBENCH_RESULTS")]
    pub input: Option<PathBuf>,

    /// Metric to summarise (repeatable; defaults to the configured metrics)
    #[arg(long = "metric")]
    pub metrics: Vec<Metric>,

    /// Condition to group by (prompts, rate, both)
    #[arg(short, long, default_value = "both")]
    pub group_by: GroupBy,

    /// Model name shown in titles
    #[arg(short, long)]
    pub model: Option<String>,

    /// Export format (md, html, json) instead of printing
    #[arg(short, long)]
    pub export: Option<ExportFormat>,

    /// Directory for exported files
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One metric's summary in JSON output.
#[derive(Debug, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub title: String,
    pub rows: Vec<MetricComparisonRow>,
}

struct Section {
    metric: Metric,
    table: ReportTable,
    rows: Vec<MetricComparisonRow>,
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, config: &ReportConfig, json: bool) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.input.clone());
    let Some(loaded) = super::load_input(&input, json)? else {
        return Ok(());
    };

    let metrics = if args.metrics.is_empty() {
        config.metrics.clone()
    } else {
        args.metrics
    };
    let model = args.model.as_deref().unwrap_or(&config.model);

    let table = aggregate(&loaded.records, args.group_by);
    let conditions: Vec<String> = table.rows.iter().map(|row| row.key.to_string()).collect();
    info!(
        ?conditions,
        group_by = %args.group_by,
        "Aggregated benchmark records"
    );

    let sections: Vec<Section> = metrics
        .into_iter()
        .map(|metric| {
            let rows = compare_metric(&table, metric, &config.frameworks);
            let report = metric_summary(&rows, args.group_by, &config.frameworks, model, metric);
            Section {
                metric,
                table: report,
                rows,
            }
        })
        .collect();

    if let Some(format) = args.export {
        let output_dir = args.output.unwrap_or_else(|| config.output_dir.clone());
        let reports: Vec<Report<'_, Vec<MetricComparisonRow>>> = sections
            .iter()
            .map(|section| Report {
                title: &section.table.title,
                file_stem: io::summary_file_stem(section.metric),
                tables: std::slice::from_ref(&section.table),
                data: &section.rows,
            })
            .collect();
        return super::export_all(&reports, format, &output_dir, json);
    }

    if json {
        let summaries: Vec<MetricSummary> = sections
            .into_iter()
            .map(|section| MetricSummary {
                metric: section.metric,
                title: section.table.title,
                rows: section.rows,
            })
            .collect();
        output::json(&CommandOutput::data(summaries))?;
    } else {
        for section in &sections {
            output::report_table(&section.table);
        }
    }

    Ok(())
}
