//! # Framebench Core
//!
//! Aggregation and comparison core for inference framework benchmark reports.
//!
//! This crate provides:
//! - Benchmark record types and a tolerant newline-delimited JSON loader
//! - Grouping by experimental condition with per-framework metric means
//! - The "fastest framework" comparison between two frameworks
//! - Markdown, HTML and JSON report rendering and export
//! - Benchmark directory index generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use framebench_core::{aggregate, compare_metric, load_file, GroupBy, Metric, ReportConfig};
//!
//! let config = ReportConfig::default();
//! let loaded = load_file("results.json")?;
//! let table = aggregate(&loaded.records, GroupBy::Both);
//! let rows = compare_metric(&table, Metric::MeanTtftMs, &config.frameworks);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod error;
pub mod html;
pub mod index;
pub mod io;
pub mod load;
pub mod markdown;
pub mod record;
pub mod report;

pub use aggregate::{aggregate, AggregateRow, AggregateTable, ConditionKey, GroupBy, MetricMeans};
pub use compare::{compare, compare_metric, Comparison, MetricComparisonRow, Winner};
pub use config::{FrameworkPair, IndexConfig, ReportConfig};
pub use error::{ReportError, ReportResult};
pub use load::{load_file, load_records, LoadedRecords, SkippedLine};
pub use record::{BenchmarkRecord, Metric, RequestRate};
pub use report::ReportTable;
