//! Issues and diagnostics data model.
//!
//! - [`Issue`]: a 1-based, line-positioned note produced by an external analysis service.
//! - [`Diagnostic`]: a character-range note produced by a local processor (e.g. the heuristic
//!   linter).
//!
//! Both are derived, session-scoped state: they are replaced wholesale, never patched.

use serde::{Deserialize, Serialize};

/// Severity of an issue or diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Errors.
    Error,
    /// Warnings.
    Warning,
    /// Informational notes. Unknown severities fall back to this.
    #[default]
    Info,
}

impl Severity {
    /// Stable identifier (`"error"`, `"warning"`, `"info"`).
    pub fn id(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Lenient parse: anything other than `error`/`warning` is [`Severity::Info`].
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Secondary rating attached by analysis services (`"high"`, `"medium"`, `"low"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// High priority.
    High,
    /// Medium priority.
    Medium,
    /// Low priority.
    Low,
}

impl Priority {
    /// Parse an identifier; unknown values yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// A positioned issue reported against the current document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// 1-based line number. `0` means the producer gave no usable line.
    pub line: u32,
    /// Issue severity (`type` on the wire).
    #[serde(rename = "type", default)]
    pub severity: Severity,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Optional priority (`severity` on the wire).
    #[serde(rename = "severity", default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Issue {
    /// Create an issue without a priority.
    pub fn new(line: u32, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            line,
            severity,
            message: message.into(),
            priority: None,
        }
    }

    /// Attach a priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A half-open character-offset range (`start..end`) in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticRange {
    /// Range start offset (inclusive), in Unicode scalar values (`char`) from the start of the document.
    pub start: usize,
    /// Range end offset (exclusive), in Unicode scalar values (`char`) from the start of the document.
    pub end: usize,
}

impl DiagnosticRange {
    /// Create a new diagnostic range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A single diagnostic item for the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Diagnostic range in character offsets.
    pub range: DiagnosticRange,
    /// 1-based line the diagnostic is anchored to.
    pub line: usize,
    /// Diagnostic severity.
    pub severity: Severity,
    /// Optional diagnostic code (e.g. `"loose-equality"`).
    pub code: Option<String>,
    /// Optional diagnostic source (e.g. `"dsaa-lint"`).
    pub source: Option<String>,
    /// Diagnostic message.
    pub message: String,
}
