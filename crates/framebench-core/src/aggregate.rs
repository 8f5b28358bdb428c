//! Grouping of benchmark records by experimental condition.
//!
//! Records are partitioned by (condition key, framework) and the mean of
//! every metric is computed per partition. A framework's mean is never
//! computed from another framework's records.

use crate::record::{BenchmarkRecord, Metric, RequestRate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Which record fields form the condition key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Group by `num_prompts` only.
    NumPrompts,
    /// Group by `request_rate` only.
    RequestRate,
    /// Group by both fields.
    #[default]
    Both,
}

impl GroupBy {
    fn uses_num_prompts(self) -> bool {
        matches!(self, Self::NumPrompts | Self::Both)
    }

    fn uses_request_rate(self) -> bool {
        matches!(self, Self::RequestRate | Self::Both)
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompts" | "num_prompts" => Ok(Self::NumPrompts),
            "rate" | "request_rate" => Ok(Self::RequestRate),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown grouping '{other}' (expected prompts, rate or both)"
            )),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NumPrompts => "prompts",
            Self::RequestRate => "rate",
            Self::Both => "both",
        })
    }
}

/// Experimental condition a row is grouped under.
///
/// Fields not selected by the [`GroupBy`] are always `None`. Keys order by
/// request rate first, then by number of prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionKey {
    /// Number of prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_prompts: Option<u64>,
    /// Request rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_rate: Option<RequestRate>,
}

impl ConditionKey {
    /// Key of a record, or `None` if it lacks a field the grouping needs.
    pub fn from_record(record: &BenchmarkRecord, group_by: GroupBy) -> Option<Self> {
        let num_prompts = if group_by.uses_num_prompts() {
            Some(record.num_prompts?)
        } else {
            None
        };
        let request_rate = if group_by.uses_request_rate() {
            Some(record.request_rate?)
        } else {
            None
        };

        Some(Self {
            num_prompts,
            request_rate,
        })
    }
}

impl Ord for ConditionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.request_rate
            .cmp(&other.request_rate)
            .then_with(|| self.num_prompts.cmp(&other.num_prompts))
    }
}

impl PartialOrd for ConditionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.num_prompts, self.request_rate) {
            (Some(n), Some(rate)) => write!(f, "num_prompts={n}, request_rate={rate}"),
            (Some(n), None) => write!(f, "num_prompts={n}"),
            (None, Some(rate)) => write!(f, "request_rate={rate}"),
            (None, None) => f.write_str("all"),
        }
    }
}

/// Mean metric values of one framework under one condition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MetricMeans {
    /// Mean time to first token.
    pub mean_ttft_ms: Option<f64>,
    /// Mean time per output token.
    pub mean_tpot_ms: Option<f64>,
    /// Mean inter-token latency.
    pub mean_itl_ms: Option<f64>,
    /// Number of records in the partition.
    pub samples: usize,
}

impl MetricMeans {
    /// Mean of one metric.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::MeanTtftMs => self.mean_ttft_ms,
            Metric::MeanTpotMs => self.mean_tpot_ms,
            Metric::MeanItlMs => self.mean_itl_ms,
        }
    }
}

/// Running sums for one (condition, framework) partition.
#[derive(Debug, Default)]
struct Accumulator {
    sums: [f64; 3],
    counts: [usize; 3],
    samples: usize,
}

impl Accumulator {
    fn push(&mut self, record: &BenchmarkRecord) {
        self.samples += 1;
        for (slot, metric) in Metric::ALL.into_iter().enumerate() {
            if let Some(value) = record.metric(metric) {
                self.sums[slot] += value;
                self.counts[slot] += 1;
            }
        }
    }

    fn mean(&self, slot: usize) -> Option<f64> {
        (self.counts[slot] > 0).then(|| self.sums[slot] / self.counts[slot] as f64)
    }

    fn finish(&self) -> MetricMeans {
        MetricMeans {
            mean_ttft_ms: self.mean(0),
            mean_tpot_ms: self.mean(1),
            mean_itl_ms: self.mean(2),
            samples: self.samples,
        }
    }
}

/// Per-framework means for one condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    /// Condition the row covers.
    pub key: ConditionKey,
    /// Means keyed by framework label.
    pub frameworks: BTreeMap<String, MetricMeans>,
    /// Model ids seen under this condition.
    pub model_ids: BTreeSet<String>,
}

impl AggregateRow {
    /// Mean of a metric for a framework, if the framework ran this condition.
    pub fn mean(&self, framework: &str, metric: Metric) -> Option<f64> {
        self.frameworks.get(framework).and_then(|m| m.get(metric))
    }
}

/// Result of [`aggregate`]: rows ordered by condition key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    /// Grouping used to build the table.
    pub group_by: GroupBy,
    /// Rows in ascending key order.
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All framework labels present in the table.
    pub fn frameworks(&self) -> BTreeSet<&str> {
        self.rows
            .iter()
            .flat_map(|row| row.frameworks.keys().map(String::as_str))
            .collect()
    }
}

/// Group records by condition and framework and compute metric means.
pub fn aggregate(records: &[BenchmarkRecord], group_by: GroupBy) -> AggregateTable {
    let mut partitions: BTreeMap<ConditionKey, (BTreeMap<String, Accumulator>, BTreeSet<String>)> =
        BTreeMap::new();
    let mut excluded = 0usize;

    for record in records {
        let Some(key) = ConditionKey::from_record(record, group_by) else {
            excluded += 1;
            continue;
        };

        let (frameworks, model_ids) = partitions.entry(key).or_default();
        frameworks
            .entry(record.framework.clone())
            .or_default()
            .push(record);
        if let Some(model_id) = &record.model_id {
            model_ids.insert(model_id.clone());
        }
    }

    if excluded > 0 {
        debug!(excluded, %group_by, "Records missing condition fields were excluded");
    }

    let rows = partitions
        .into_iter()
        .map(|(key, (frameworks, model_ids))| AggregateRow {
            key,
            frameworks: frameworks
                .into_iter()
                .map(|(framework, acc)| (framework, acc.finish()))
                .collect(),
            model_ids,
        })
        .collect();

    AggregateTable { group_by, rows }
}
