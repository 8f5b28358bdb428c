//! "Fastest framework" comparison.

use crate::aggregate::{AggregateTable, ConditionKey};
use crate::config::FrameworkPair;
use crate::record::Metric;
use serde::Serialize;

/// Outcome of comparing two frameworks on one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// The first framework had the lower value.
    FrameworkA,
    /// The second framework had the lower value.
    FrameworkB,
    /// Both values were equal.
    Tie,
    /// At least one value was missing.
    NotAvailable,
}

impl Winner {
    /// Display label, resolving A/B to the configured framework names.
    pub fn label<'a>(&self, frameworks: &'a FrameworkPair) -> &'a str {
        match self {
            Self::FrameworkA => frameworks.a.as_str(),
            Self::FrameworkB => frameworks.b.as_str(),
            Self::Tie => "tie",
            Self::NotAvailable => "not available",
        }
    }
}

/// Winner and margin of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// Which framework was faster.
    pub winner: Winner,
    /// How much faster the winner was, as a percentage of the slower value.
    pub margin_percent: f64,
}

impl Comparison {
    const fn without_margin(winner: Winner) -> Self {
        Self {
            winner,
            margin_percent: 0.0,
        }
    }
}

/// Compare framework A's value `a` against framework B's value `b`.
///
/// Lower is faster. The margin is relative to the slower (larger) value and
/// rounded to two decimals, half to even. A missing or NaN value yields
/// [`Winner::NotAvailable`].
pub fn compare(a: Option<f64>, b: Option<f64>) -> Comparison {
    let (Some(a), Some(b)) = (a, b) else {
        return Comparison::without_margin(Winner::NotAvailable);
    };
    if a.is_nan() || b.is_nan() {
        return Comparison::without_margin(Winner::NotAvailable);
    }

    if a < b {
        Comparison {
            winner: Winner::FrameworkA,
            margin_percent: round2(100.0 * (b - a) / b),
        }
    } else if b < a {
        Comparison {
            winner: Winner::FrameworkB,
            margin_percent: round2(100.0 * (a - b) / a),
        }
    } else {
        Comparison::without_margin(Winner::Tie)
    }
}

/// Round to two decimals, resolving exact halves to even like decimal
/// formatting does.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// One condition's comparison for a single metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparisonRow {
    /// Condition compared.
    pub key: ConditionKey,
    /// Metric compared.
    pub metric: Metric,
    /// Framework A's mean.
    pub a: Option<f64>,
    /// Framework B's mean.
    pub b: Option<f64>,
    /// Comparison outcome.
    pub winner: Winner,
    /// Resolved winner label.
    pub fastest: String,
    /// Margin in percent.
    pub margin_percent: f64,
}

/// Compare the two frameworks on `metric` for every row of `table`.
///
/// Conditions present for only one framework are kept with a
/// [`Winner::NotAvailable`] outcome.
pub fn compare_metric(
    table: &AggregateTable,
    metric: Metric,
    frameworks: &FrameworkPair,
) -> Vec<MetricComparisonRow> {
    table
        .rows
        .iter()
        .map(|row| {
            let a = row.mean(&frameworks.a, metric);
            let b = row.mean(&frameworks.b, metric);
            let outcome = compare(a, b);

            MetricComparisonRow {
                key: row.key,
                metric,
                a,
                b,
                winner: outcome.winner,
                fastest: outcome.winner.label(frameworks).to_string(),
                margin_percent: outcome.margin_percent,
            }
        })
        .collect()
}
