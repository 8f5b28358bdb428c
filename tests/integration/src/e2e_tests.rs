//! End-to-end pipeline tests
//!
//! Results file on disk → load → aggregate → compare → render/export.

use crate::fixtures::*;
use crate::helpers::*;
use chrono::{TimeZone, Utc};
use framebench_core::index::update_index;
use framebench_core::io::{self, ExportFormat, Report};
use framebench_core::report::{condition_breakdown, metric_summary};
use framebench_core::{
    aggregate, compare_metric, load_file, FrameworkPair, GroupBy, IndexConfig, Metric,
    ReportConfig, RequestRate, Winner,
};
use pretty_assertions::assert_eq;

/// E2E test: corrupt lines do not hide the rest of the campaign
#[test]
fn test_e2e_load_with_noise() {
    init_tracing();
    let workspace = TestWorkspace::with_results(&campaign_ndjson_with_noise());

    let loaded = load_file(workspace.path("results.json")).expect("Failed to load");

    assert_eq!(loaded.records.len(), campaign_lines().len());
    assert_eq!(loaded.skipped.len(), 1);
    assert_eq!(loaded.skipped[0].content, "{not json");
}

/// E2E test: TTFT comparison across every request rate
#[test]
fn test_e2e_ttft_comparison_by_condition() {
    let workspace = TestWorkspace::with_results(&campaign_ndjson_with_noise());
    let loaded = load_file(workspace.path("results.json")).expect("Failed to load");
    let frameworks = FrameworkPair::default();

    let table = aggregate(&loaded.records, GroupBy::Both);
    let rows = compare_metric(&table, Metric::MeanTtftMs, &frameworks);

    let rates: Vec<Option<RequestRate>> = rows.iter().map(|r| r.key.request_rate).collect();
    assert_eq!(
        rates,
        vec![
            Some(RequestRate::Finite(1.0)),
            Some(RequestRate::Finite(4.0)),
            Some(RequestRate::Finite(16.0)),
            Some(RequestRate::Unbounded),
        ]
    );

    let outcomes: Vec<(Winner, f64)> = rows.iter().map(|r| (r.winner, r.margin_percent)).collect();
    assert_eq!(
        outcomes,
        vec![
            (Winner::FrameworkA, 20.0),
            (Winner::FrameworkB, 33.33),
            (Winner::NotAvailable, 0.0),
            (Winner::Tie, 0.0),
        ]
    );
    assert_eq!(rows[1].a, Some(90.0));
    assert_eq!(rows[1].b, Some(60.0));
}

/// E2E test: the margin denominator is the slower framework's value
#[test]
fn test_e2e_tpot_margin_uses_slower_value() {
    let workspace = TestWorkspace::with_results(&to_ndjson(&campaign_lines()));
    let loaded = load_file(workspace.path("results.json")).expect("Failed to load");

    let table = aggregate(&loaded.records, GroupBy::RequestRate);
    let rows = compare_metric(&table, Metric::MeanTpotMs, &FrameworkPair::default());

    // rate 4: vllm 17ms vs sgl 15ms → sgl faster by 2/17
    assert_eq!(rows[1].winner, Winner::FrameworkB);
    assert_eq!(rows[1].margin_percent, 11.76);
}

/// E2E test: grouping by prompts pools every rate
#[test]
fn test_e2e_group_by_prompts() {
    let workspace = TestWorkspace::with_results(&to_ndjson(&campaign_lines()));
    let loaded = load_file(workspace.path("results.json")).expect("Failed to load");

    let table = aggregate(&loaded.records, GroupBy::NumPrompts);
    assert_eq!(table.rows.len(), 1);

    let rows = compare_metric(&table, Metric::MeanTtftMs, &FrameworkPair::default());
    assert_eq!(rows[0].a, Some(128.0));
    assert_eq!(rows[0].winner, Winner::FrameworkA);
    assert_eq!(rows[0].margin_percent, 6.34);
}

/// E2E test: summary export in every format from one comparison
#[test]
fn test_e2e_summary_export() {
    let workspace = TestWorkspace::with_results(&to_ndjson(&campaign_lines()));
    let config = ReportConfig {
        output_dir: workspace.path("out"),
        ..ReportConfig::default()
    };
    let loaded = load_file(workspace.path("results.json")).expect("Failed to load");
    let table = aggregate(&loaded.records, GroupBy::Both);
    let rows = compare_metric(&table, Metric::MeanItlMs, &config.frameworks);
    let summary = metric_summary(
        &rows,
        GroupBy::Both,
        &config.frameworks,
        &config.model,
        Metric::MeanItlMs,
    );
    let report = Report {
        title: &summary.title,
        file_stem: io::summary_file_stem(Metric::MeanItlMs),
        tables: std::slice::from_ref(&summary),
        data: &rows,
    };
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

    let md = io::export(&report, ExportFormat::Markdown, &config.output_dir, at).expect("md");
    let html = io::export(&report, ExportFormat::Html, &config.output_dir, at).expect("html");
    let json = io::export(&report, ExportFormat::Json, &config.output_dir, at).expect("json");

    assert!(md.ends_with("summary_mean_itl_ms.md"));
    let md_content = workspace.read("out/summary_mean_itl_ms.md");
    assert!(md_content.contains(
        "## Model: meta-llama/Llama-3.1-8B-Instruct | mean_itl_ms (Mean Inference Token Latency)"
    ));
    assert!(md_content.contains("| 1 | 100 | 10.00 | 12.50 | vllm | 20.00% |"));
    assert!(md_content.contains("| infinite | 100 | 20.00 | 25.00 | vllm | 20.00% |"));
    assert!(md_content.contains("| 16 | 100 | 19.00 | - | not available | 0.00% |"));

    assert!(html.exists());
    assert!(workspace
        .read("out/summary_mean_itl_ms.html")
        .contains("<td>not available</td>"));

    let value: serde_json::Value =
        serde_json::from_str(&workspace.read("out/summary_mean_itl_ms.json")).expect("parse");
    assert!(json.exists());
    assert_eq!(value["data"][3]["key"]["request_rate"], "inf");
    assert_eq!(value["data"][3]["fastest"], "vllm");
    assert_eq!(value["generated_at"], "2025-06-01T00:00:00Z");
}

/// E2E test: per-prompt breakdown names the model
#[test]
fn test_e2e_prompt_breakdown() {
    let workspace = TestWorkspace::with_results(&to_ndjson(&campaign_lines()));
    let loaded = load_file(workspace.path("results.json")).expect("Failed to load");
    let table = aggregate(&loaded.records, GroupBy::NumPrompts);

    let breakdown = condition_breakdown(&table.rows[0], &FrameworkPair::default(), &Metric::ALL);
    assert_eq!(
        breakdown.title,
        "Model: meta-llama/Llama-3.1-8B-Instruct | Prompts: 100"
    );
    assert_eq!(breakdown.rows.len(), 3);
    assert_eq!(breakdown.rows[0][0], "mean_ttft_ms");
    assert_eq!(breakdown.rows[0][1], "128.00");
    assert_eq!(breakdown.rows[0][2], "136.67");
}

/// E2E test: index regeneration over a site tree
#[test]
fn test_e2e_index() {
    let workspace = TestWorkspace::new();
    let site = workspace.mkdir("vllm-benchmarks");
    workspace.mkdir("vllm-benchmarks/2025-04-01-llama");
    workspace.mkdir("vllm-benchmarks/2025-05-12-qwen");
    workspace.mkdir("vllm-benchmarks/.github");
    workspace.write("vllm-benchmarks/README.md", "not a benchmark");

    let config = IndexConfig {
        target_dir: site,
        ..IndexConfig::default()
    };
    let entries = update_index(&config).expect("Failed to update index");

    assert_eq!(entries, 2);
    assert_eq!(
        workspace.read("vllm-benchmarks/index.md"),
        "# Inference Framework Benchmarks\n\n\
         - [2025-05-12-qwen](./2025-05-12-qwen)\n\
         - [2025-04-01-llama](./2025-04-01-llama)\n"
    );
}

/// E2E test: an all-corrupt results file is an empty result, not an error
#[test]
fn test_e2e_empty_dataset() {
    let workspace = TestWorkspace::with_results("{oops\n[1,2]\n");
    let loaded = load_file(workspace.path("results.json")).expect("Failed to load");

    assert!(loaded.is_empty());
    let table = aggregate(&loaded.records, GroupBy::Both);
    assert!(table.is_empty());
    assert!(compare_metric(&table, Metric::MeanTtftMs, &FrameworkPair::default()).is_empty());
}
