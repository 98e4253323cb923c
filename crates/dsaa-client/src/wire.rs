//! Request/response payloads for the debug and analysis services.
//!
//! Responses are parsed from a [`serde_json::Value`] rather than derived, so that missing or
//! mistyped fields degrade to empty values instead of failing the whole response:
//!
//! - non-array `issues` / `fixSuggestions` / `intuition` / ... become empty lists
//! - an issue without a positive integer `line` gets line `0` (the overlay drops it)
//! - unknown issue `type`s become [`Severity::Info`]

use dsaa_core::{DebugReport, Issue, Priority, Severity};
use dsaa_lang::LanguageLabel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use dsaa_core::DebugSubmission as DebugRequest;

/// Payload for `POST /api/v1/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Full source text.
    pub code: String,
    /// Detected language.
    pub language: LanguageLabel,
}

/// Complexity/pattern report returned by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Big-O time complexity (e.g. `"O(n log n)"`).
    pub time_complexity: String,
    /// Big-O space complexity.
    pub space_complexity: String,
    /// Dominant algorithmic pattern.
    pub pattern: String,
    /// One or two sentence summary.
    pub summary: String,
    /// Key reasoning steps.
    pub intuition: Vec<String>,
    /// Optimization ideas.
    pub suggestions: Vec<String>,
    /// Relative time cost samples for growing input sizes.
    pub time_graph: Vec<i64>,
    /// Relative space cost samples for growing input sizes.
    pub space_graph: Vec<i64>,
}

/// Liveness report returned by `GET /api/v1/health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    /// Service state, `"UP"` when healthy.
    pub status: String,
    /// Human-readable service name.
    pub service: String,
    /// Service version string.
    pub version: String,
}

impl HealthStatus {
    /// Returns `true` when the service reports itself as up.
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

/// Parse a health response body into a [`HealthStatus`].
pub fn parse_health_status(value: &Value) -> HealthStatus {
    HealthStatus {
        status: string_field(value, "status"),
        service: string_field(value, "service"),
        version: string_field(value, "version"),
    }
}

/// Parse a debug response body into a [`DebugReport`].
pub fn parse_debug_response(value: &Value) -> DebugReport {
    DebugReport {
        issues: array_field(value, "issues")
            .iter()
            .map(parse_issue)
            .collect(),
        fix_suggestions: string_list(value, "fixSuggestions"),
        explanation: value
            .get("explanation")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
    }
}

/// Parse a single issue object.
pub fn parse_issue(value: &Value) -> Issue {
    let line = value.get("line").map(parse_line).unwrap_or(0);
    let severity = value
        .get("type")
        .and_then(Value::as_str)
        .map(Severity::from_id)
        .unwrap_or_default();
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let priority = value
        .get("severity")
        .and_then(Value::as_str)
        .and_then(Priority::from_id);

    Issue {
        line,
        severity,
        message,
        priority,
    }
}

/// Parse an analysis response body into an [`AnalysisReport`].
pub fn parse_analysis_report(value: &Value) -> AnalysisReport {
    AnalysisReport {
        time_complexity: string_field(value, "timeComplexity"),
        space_complexity: string_field(value, "spaceComplexity"),
        pattern: string_field(value, "pattern"),
        summary: string_field(value, "summary"),
        intuition: string_list(value, "intuition"),
        suggestions: string_list(value, "suggestions"),
        time_graph: int_list(value, "timeGraph"),
        space_graph: int_list(value, "spaceGraph"),
    }
}

fn parse_line(value: &Value) -> u32 {
    let line = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    line.and_then(|line| u32::try_from(line).ok()).unwrap_or(0)
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    match value.get(key) {
        Some(Value::Array(items)) => items.as_slice(),
        Some(Value::Null) | None => &[],
        Some(other) => {
            tracing::warn!(field = key, kind = %json_kind(other), "expected an array; using []");
            &[]
        }
    }
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    array_field(value, key)
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn int_list(value: &Value, key: &str) -> Vec<i64> {
    array_field(value, key)
        .iter()
        .filter_map(Value::as_i64)
        .collect()
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
