//! Benchmark record types.
//!
//! A [`BenchmarkRecord`] is one line of a benchmark results file: the
//! framework that served the run, the experimental condition (number of
//! prompts and request rate) and the latency metrics it measured.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One benchmark observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Framework label (e.g. `vllm`, `sgl`).
    pub framework: String,

    /// Model the benchmark ran against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    /// Number of prompts sent during the run.
    #[serde(
        default,
        deserialize_with = "deserialize_prompts",
        skip_serializing_if = "Option::is_none"
    )]
    pub num_prompts: Option<u64>,

    /// Offered request rate.
    #[serde(
        default,
        deserialize_with = "deserialize_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_rate: Option<RequestRate>,

    /// Mean time to first token in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_ttft_ms: Option<f64>,

    /// Mean time per output token in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_tpot_ms: Option<f64>,

    /// Mean inter-token latency in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_itl_ms: Option<f64>,
}

impl BenchmarkRecord {
    /// Create a record for a framework with no condition or metrics set.
    pub fn new(framework: impl Into<String>) -> Self {
        Self {
            framework: framework.into(),
            model_id: None,
            num_prompts: None,
            request_rate: None,
            mean_ttft_ms: None,
            mean_tpot_ms: None,
            mean_itl_ms: None,
        }
    }

    /// Set the number of prompts.
    #[must_use]
    pub fn with_num_prompts(mut self, num_prompts: u64) -> Self {
        self.num_prompts = Some(num_prompts);
        self
    }

    /// Set the request rate.
    #[must_use]
    pub fn with_request_rate(mut self, rate: RequestRate) -> Self {
        self.request_rate = Some(rate);
        self
    }

    /// Set the model id.
    #[must_use]
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Set a metric value.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        match metric {
            Metric::MeanTtftMs => self.mean_ttft_ms = Some(value),
            Metric::MeanTpotMs => self.mean_tpot_ms = Some(value),
            Metric::MeanItlMs => self.mean_itl_ms = Some(value),
        }
        self
    }

    /// Value of a metric, if the record carries a usable one.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        let value = match metric {
            Metric::MeanTtftMs => self.mean_ttft_ms,
            Metric::MeanTpotMs => self.mean_tpot_ms,
            Metric::MeanItlMs => self.mean_itl_ms,
        };
        value.filter(|v| !v.is_nan())
    }
}

/// Latency metric reported by a benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Mean time to first token.
    MeanTtftMs,
    /// Mean time per output token.
    MeanTpotMs,
    /// Mean inter-token latency.
    MeanItlMs,
}

impl Metric {
    /// All metrics, in report order.
    pub const ALL: [Self; 3] = [Self::MeanTtftMs, Self::MeanTpotMs, Self::MeanItlMs];

    /// Field name used in result files.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::MeanTtftMs => "mean_ttft_ms",
            Self::MeanTpotMs => "mean_tpot_ms",
            Self::MeanItlMs => "mean_itl_ms",
        }
    }

    /// Descriptive name used in report titles.
    pub fn full_name(self) -> &'static str {
        match self {
            Self::MeanTtftMs => "Mean Time To First Token",
            Self::MeanTpotMs => "Mean Time Per Output Token",
            Self::MeanItlMs => "Mean Inference Token Latency",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean_ttft_ms" | "ttft" => Ok(Self::MeanTtftMs),
            "mean_tpot_ms" | "tpot" => Ok(Self::MeanTpotMs),
            "mean_itl_ms" | "itl" => Ok(Self::MeanItlMs),
            other => Err(format!(
                "unknown metric '{other}' (expected mean_ttft_ms, mean_tpot_ms or mean_itl_ms)"
            )),
        }
    }
}

/// Offered request rate of a benchmark run.
///
/// Benchmarks that send every request at once record an infinite rate;
/// that case is [`RequestRate::Unbounded`], which orders after every
/// finite rate.
#[derive(Debug, Clone, Copy)]
pub enum RequestRate {
    /// Requests per second.
    Finite(f64),
    /// No rate limit.
    Unbounded,
}

impl RequestRate {
    /// Build a rate from a number. NaN and negative infinity are not rates.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() || value == f64::NEG_INFINITY {
            None
        } else if value.is_infinite() {
            Some(Self::Unbounded)
        } else {
            Some(Self::Finite(value))
        }
    }

    /// Coerce a JSON value into a rate.
    ///
    /// Numbers and numeric strings are accepted; anything else is `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().and_then(Self::from_f64),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Whether the rate is unbounded.
    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl FromStr for RequestRate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        match trimmed.as_str() {
            "inf" | "+inf" | "infinity" | "+infinity" | "infinite" => Ok(Self::Unbounded),
            _ => trimmed
                .parse::<f64>()
                .ok()
                .and_then(Self::from_f64)
                .ok_or_else(|| format!("invalid request rate '{s}'")),
        }
    }
}

impl Ord for RequestRate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => a.total_cmp(b),
            (Self::Finite(_), Self::Unbounded) => Ordering::Less,
            (Self::Unbounded, Self::Finite(_)) => Ordering::Greater,
            (Self::Unbounded, Self::Unbounded) => Ordering::Equal,
        }
    }
}

impl PartialOrd for RequestRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RequestRate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RequestRate {}

impl fmt::Display for RequestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(rate) => write!(f, "{rate}"),
            Self::Unbounded => f.write_str("infinite"),
        }
    }
}

impl Serialize for RequestRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(rate) => serializer.serialize_f64(*rate),
            Self::Unbounded => serializer.serialize_str("inf"),
        }
    }
}

impl<'de> Deserialize<'de> for RequestRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid request rate: {value}")))
    }
}

/// Lenient rate field: unparsable values become `None` instead of failing the line.
fn deserialize_rate<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<RequestRate>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(RequestRate::from_json))
}

/// Lenient prompt count: integral floats and numeric strings are accepted,
/// anything else becomes `None`.
fn deserialize_prompts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(prompt_count))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn prompt_count(value: &serde_json::Value) -> Option<u64> {
    let number = match value {
        serde_json::Value::Number(n) => {
            if let Some(count) = n.as_u64() {
                return Some(count);
            }
            n.as_f64()?
        }
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Ok(count) = s.parse::<u64>() {
                return Some(count);
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };

    let integral = number.is_finite() && number >= 0.0 && number.fract() == 0.0;
    (integral && number <= u64::MAX as f64).then(|| number as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialize_full() {
        let record: BenchmarkRecord = serde_json::from_str(
            r#"{"framework":"vllm","model_id":"m","num_prompts":100,"request_rate":4,
                "mean_ttft_ms":12.5,"mean_tpot_ms":3.0,"mean_itl_ms":2.5,"extra":"ignored"}"#,
        )
        .expect("Failed to parse record");

        assert_eq!(record.framework, "vllm");
        assert_eq!(record.model_id.as_deref(), Some("m"));
        assert_eq!(record.num_prompts, Some(100));
        assert_eq!(record.request_rate, Some(RequestRate::Finite(4.0)));
        assert_eq!(record.metric(Metric::MeanTtftMs), Some(12.5));
        assert_eq!(record.metric(Metric::MeanItlMs), Some(2.5));
    }

    #[test]
    fn test_record_missing_fields_default_to_none() {
        let record: BenchmarkRecord =
            serde_json::from_str(r#"{"framework":"sgl"}"#).expect("Failed to parse record");
        assert_eq!(record.num_prompts, None);
        assert_eq!(record.request_rate, None);
        assert_eq!(record.metric(Metric::MeanTpotMs), None);
    }

    #[test]
    fn test_record_requires_framework() {
        let result: Result<BenchmarkRecord, _> = serde_json::from_str(r#"{"num_prompts":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_rate_inf_string() {
        let record: BenchmarkRecord =
            serde_json::from_str(r#"{"framework":"vllm","request_rate":"inf"}"#)
                .expect("Failed to parse record");
        assert_eq!(record.request_rate, Some(RequestRate::Unbounded));
    }

    #[test]
    fn test_request_rate_numeric_string() {
        let record: BenchmarkRecord =
            serde_json::from_str(r#"{"framework":"vllm","request_rate":"2.5"}"#)
                .expect("Failed to parse record");
        assert_eq!(record.request_rate, Some(RequestRate::Finite(2.5)));
    }

    #[test]
    fn test_request_rate_garbage_is_coerced_to_none() {
        let record: BenchmarkRecord =
            serde_json::from_str(r#"{"framework":"vllm","request_rate":"fast"}"#)
                .expect("Failed to parse record");
        assert_eq!(record.request_rate, None);
    }

    #[test]
    fn test_num_prompts_lenient_forms() {
        for raw in ["100", "100.0", r#""100""#, r#"" 100.0 ""#] {
            let record: BenchmarkRecord =
                serde_json::from_str(&format!(r#"{{"framework":"vllm","num_prompts":{raw}}}"#))
                    .expect("Failed to parse record");
            assert_eq!(record.num_prompts, Some(100), "num_prompts = {raw}");
        }
    }

    #[test]
    fn test_num_prompts_unusable_values_become_none() {
        for raw in ["12.5", "-3", r#""many""#, "null", "[1]"] {
            let record: BenchmarkRecord =
                serde_json::from_str(&format!(r#"{{"framework":"vllm","num_prompts":{raw}}}"#))
                    .expect("Failed to parse record");
            assert_eq!(record.num_prompts, None, "num_prompts = {raw}");
        }
    }

    #[test]
    fn test_request_rate_ordering() {
        let mut rates = vec![
            RequestRate::Unbounded,
            RequestRate::Finite(8.0),
            RequestRate::Finite(1.0),
        ];
        rates.sort();
        assert_eq!(
            rates,
            vec![
                RequestRate::Finite(1.0),
                RequestRate::Finite(8.0),
                RequestRate::Unbounded,
            ]
        );
    }

    #[test]
    fn test_request_rate_display() {
        assert_eq!(RequestRate::Finite(4.0).to_string(), "4");
        assert_eq!(RequestRate::Finite(2.5).to_string(), "2.5");
        assert_eq!(RequestRate::Unbounded.to_string(), "infinite");
    }

    #[test]
    fn test_request_rate_from_f64() {
        assert_eq!(RequestRate::from_f64(f64::INFINITY), Some(RequestRate::Unbounded));
        assert_eq!(RequestRate::from_f64(f64::NAN), None);
        assert_eq!(RequestRate::from_f64(f64::NEG_INFINITY), None);
    }

    #[test]
    fn test_request_rate_serializes_unbounded_as_inf() {
        let json = serde_json::to_string(&RequestRate::Unbounded).expect("Failed to serialize");
        assert_eq!(json, r#""inf""#);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("mean_ttft_ms".parse::<Metric>(), Ok(Metric::MeanTtftMs));
        assert_eq!("TPOT".parse::<Metric>(), Ok(Metric::MeanTpotMs));
        assert!("p99".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(Metric::MeanItlMs.field_name(), "mean_itl_ms");
        assert_eq!(Metric::MeanTtftMs.full_name(), "Mean Time To First Token");
    }
}
