//! Tabular report model shared by the terminal, Markdown, HTML and JSON outputs.

use crate::aggregate::{AggregateRow, GroupBy};
use crate::compare::{compare, MetricComparisonRow};
use crate::config::FrameworkPair;
use crate::record::Metric;
use serde::Serialize;

/// Placeholder for a missing value.
pub const MISSING: &str = "-";

/// A titled table of pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    /// Table title.
    pub title: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Rows of cells, each as long as `headers`.
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format a millisecond mean with two decimals.
pub fn format_ms(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.2}"))
}

/// Format a margin percentage.
pub fn format_margin(value: f64) -> String {
    format!("{value:.2}%")
}

/// Title of a metric summary.
pub fn summary_title(model: &str, metric: Metric) -> String {
    format!("Model: {model} | {metric} ({})", metric.full_name())
}

/// Build the comparison table for one metric.
///
/// Condition columns follow the grouping: request rate first, then number
/// of prompts.
pub fn metric_summary(
    rows: &[MetricComparisonRow],
    group_by: GroupBy,
    frameworks: &FrameworkPair,
    model: &str,
    metric: Metric,
) -> ReportTable {
    let mut headers = Vec::new();
    if matches!(group_by, GroupBy::RequestRate | GroupBy::Both) {
        headers.push("request_rate".to_string());
    }
    if matches!(group_by, GroupBy::NumPrompts | GroupBy::Both) {
        headers.push("num_prompts".to_string());
    }
    headers.extend([
        format!("{} (ms)", frameworks.a),
        format!("{} (ms)", frameworks.b),
        "Fastest".to_string(),
        "Faster by (%)".to_string(),
    ]);

    let body = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(headers.len());
            if let Some(rate) = row.key.request_rate {
                cells.push(rate.to_string());
            }
            if let Some(n) = row.key.num_prompts {
                cells.push(n.to_string());
            }
            cells.extend([
                format_ms(row.a),
                format_ms(row.b),
                row.fastest.clone(),
                format_margin(row.margin_percent),
            ]);
            cells
        })
        .collect();

    ReportTable {
        title: summary_title(model, metric),
        headers,
        rows: body,
    }
}

/// Build the per-metric breakdown for one condition.
///
/// Framework A and B come first; any other framework found under the
/// condition gets its own column after them.
pub fn condition_breakdown(
    row: &AggregateRow,
    frameworks: &FrameworkPair,
    metrics: &[Metric],
) -> ReportTable {
    let mut columns: Vec<&str> = vec![frameworks.a.as_str(), frameworks.b.as_str()];
    columns.extend(
        row.frameworks
            .keys()
            .map(String::as_str)
            .filter(|fw| *fw != frameworks.a && *fw != frameworks.b),
    );

    let mut headers = vec!["Metric".to_string()];
    headers.extend(columns.iter().map(|fw| format!("{fw} (ms)")));
    headers.extend(["Fastest".to_string(), "Faster by (%)".to_string()]);

    let body = metrics
        .iter()
        .map(|&metric| {
            let mut cells = vec![metric.to_string()];
            cells.extend(columns.iter().map(|fw| format_ms(row.mean(fw, metric))));
            let outcome = compare(row.mean(&frameworks.a, metric), row.mean(&frameworks.b, metric));
            cells.push(outcome.winner.label(frameworks).to_string());
            cells.push(format_margin(outcome.margin_percent));
            cells
        })
        .collect();

    let models = if row.model_ids.is_empty() {
        "unknown".to_string()
    } else {
        row.model_ids.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    let title = match row.key.num_prompts {
        Some(n) => format!("Model: {models} | Prompts: {n}"),
        None => format!("Model: {models} | {}", row.key),
    };

    ReportTable {
        title,
        headers,
        rows: body,
    }
}
