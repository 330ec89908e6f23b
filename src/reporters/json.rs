//! JSON reporter
//!
//! Outputs results as pretty-printed JSON, for piping to jq or storing.

use super::Report;
use anyhow::Result;
use serde_json::{json, Value};

fn to_value(report: Report<'_>) -> Result<Value> {
    let value = match report {
        Report::Analysis(r) => serde_json::to_value(r)?,
        Report::Rephrase(r) => serde_json::to_value(r)?,
        Report::Mirror(r) => serde_json::to_value(r)?,
        Report::Responses(r) => serde_json::to_value(r)?,
        Report::Explain(steps) => Value::Array(
            steps
                .iter()
                .map(|s| json!({ "stage": s.stage.name(), "output": s.output }))
                .collect(),
        ),
    };
    Ok(value)
}

/// Render report as JSON
pub fn render(report: Report<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_value(report)?)?)
}

/// Render report as compact JSON (single line)
pub fn render_compact(report: Report<'_>) -> Result<String> {
    Ok(serde_json::to_string(&to_value(report)?)?)
}
