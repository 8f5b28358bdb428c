//! Test fixtures and sample data for integration tests

use serde_json::{json, Value};

/// One benchmark line as a JSON value
pub fn result_line(
    framework: &str,
    num_prompts: u64,
    request_rate: Value,
    ttft: f64,
    tpot: f64,
    itl: f64,
) -> Value {
    json!({
        "framework": framework,
        "model_id": "meta-llama/Llama-3.1-8B-Instruct",
        "num_prompts": num_prompts,
        "request_rate": request_rate,
        "mean_ttft_ms": ttft,
        "mean_tpot_ms": tpot,
        "mean_itl_ms": itl,
        "duration": 12.5,
        "completed": num_prompts,
    })
}

/// A benchmark campaign: two frameworks, three rates, one of them unbounded.
///
/// At rate 1 vllm is faster on every metric, at rate 4 sgl is, and at the
/// unbounded rate the two tie on TTFT. sgl never ran rate 16.
pub fn campaign_lines() -> Vec<Value> {
    vec![
        result_line("vllm", 100, json!(1), 40.0, 10.0, 10.0),
        result_line("sgl", 100, json!(1), 50.0, 12.0, 12.5),
        result_line("vllm", 100, json!(4), 80.0, 16.0, 16.0),
        result_line("vllm", 100, json!(4), 100.0, 18.0, 18.0),
        result_line("sgl", 100, json!(4), 60.0, 15.0, 15.0),
        result_line("vllm", 100, json!("inf"), 300.0, 20.0, 20.0),
        result_line("sgl", 100, json!("inf"), 300.0, 25.0, 25.0),
        result_line("vllm", 100, json!(16), 120.0, 19.0, 19.0),
    ]
}

/// Serialize lines as a newline-delimited results file
pub fn to_ndjson(lines: &[Value]) -> String {
    lines
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The sample campaign with a corrupt line and blank lines mixed in
pub fn campaign_ndjson_with_noise() -> String {
    let lines = campaign_lines();
    let (head, tail) = lines.split_at(3);
    format!(
        "{}\n\n{{not json\n{}\n   \n",
        to_ndjson(head),
        to_ndjson(tail)
    )
}
