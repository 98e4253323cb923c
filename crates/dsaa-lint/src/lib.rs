#![warn(missing_docs)]
//! `dsaa-lint` - Simple (regex-based) line linting for `dsaa-core`.
//!
//! Each line is scanned independently against an ordered list of rules. A rule that matches a
//! line produces one diagnostic anchored to the full span of that line. There is no cross-line
//! state, no severity escalation and no suppression mechanism: this is a heuristic, not a parser.

use dsaa_core::processing::{DocumentProcessor, ProcessingEdit};
use dsaa_core::{DebugSession, Diagnostic, DiagnosticRange, Severity, SourceBuffer};
use regex::Regex;
use std::convert::Infallible;
use std::sync::LazyLock;

/// `source` attached to every diagnostic produced by this crate.
pub const LINT_SOURCE: &str = "dsaa-lint";

/// Message for loose equality comparisons.
pub const MESSAGE_LOOSE_EQUALITY: &str = "Use === instead of == for strict equality.";
/// Message for TODO markers.
pub const MESSAGE_TODO: &str = "Unresolved TODO found.";

/// A single regex lint rule.
#[derive(Debug, Clone)]
pub struct LintRule {
    regex: Regex,
    severity: Severity,
    message: String,
    code: Option<String>,
}

impl LintRule {
    /// Compile a rule that reports `message` at `severity` on every line matching `pattern`.
    pub fn new(
        pattern: &str,
        severity: Severity,
        message: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            severity,
            message: message.into(),
            code: None,
        })
    }

    /// Attach a diagnostic code (e.g. `"todo"`).
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Severity of the diagnostics this rule produces.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Message of the diagnostics this rule produces.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if the rule fires on `line_text` (a single line, without its break).
    pub fn matches(&self, line_text: &str) -> bool {
        self.regex.is_match(line_text)
    }
}

/// A line-oriented heuristic linter.
#[derive(Debug, Clone)]
pub struct HeuristicLinter {
    rules: Vec<LintRule>,
}

impl HeuristicLinter {
    /// Create a linter that applies `rules` in order.
    pub fn new(rules: Vec<LintRule>) -> Self {
        Self { rules }
    }

    /// The rules, in application order.
    pub fn rules(&self) -> &[LintRule] {
        &self.rules
    }

    /// Loose equality (warning) and TODO markers (info).
    pub fn standard() -> Result<Self, regex::Error> {
        Ok(Self::new(vec![
            // `==` that is not part of `===`, `!==`, `<==` or `>==`.
            LintRule::new(
                r"(?:^|[^=!<>])==(?:[^=]|$)",
                Severity::Warning,
                MESSAGE_LOOSE_EQUALITY,
            )?
            .with_code("loose-equality"),
            LintRule::new(r"TODO", Severity::Info, MESSAGE_TODO)?.with_code("todo"),
        ]))
    }

    /// Lint every line of `buffer`.
    ///
    /// Diagnostics are ordered by line, then by rule order within a line.
    pub fn lint(&self, buffer: &SourceBuffer) -> Vec<Diagnostic> {
        let index = buffer.line_index();
        let mut diagnostics = Vec::new();

        for line in 0..index.line_count() {
            let Some(line_text) = index.get_line_text(line) else {
                continue;
            };
            let (Some(start), Some(end)) = (index.line_start(line), index.line_end(line)) else {
                continue;
            };

            for rule in &self.rules {
                if !rule.matches(&line_text) {
                    continue;
                }
                diagnostics.push(Diagnostic {
                    range: DiagnosticRange::new(start, end),
                    line: line + 1,
                    severity: rule.severity,
                    code: rule.code.clone(),
                    source: Some(LINT_SOURCE.to_string()),
                    message: rule.message.clone(),
                });
            }
        }

        diagnostics
    }
}

static STANDARD: LazyLock<HeuristicLinter> =
    LazyLock::new(|| HeuristicLinter::standard().expect("standard lint patterns are valid"));

/// Lint `buffer` with [`HeuristicLinter::standard`].
pub fn lint(buffer: &SourceBuffer) -> Vec<Diagnostic> {
    STANDARD.lint(buffer)
}

/// A processor that replaces a session's diagnostics with [`HeuristicLinter`] output via
/// `dsaa-core`'s generic processing interface.
#[derive(Debug, Clone)]
pub struct LintProcessor {
    linter: HeuristicLinter,
}

impl LintProcessor {
    /// Create a processor around `linter`.
    pub fn new(linter: HeuristicLinter) -> Self {
        Self { linter }
    }

    /// A processor using [`HeuristicLinter::standard`].
    pub fn standard() -> Result<Self, regex::Error> {
        Ok(Self::new(HeuristicLinter::standard()?))
    }

    /// The wrapped linter.
    pub fn linter(&self) -> &HeuristicLinter {
        &self.linter
    }
}

impl DocumentProcessor for LintProcessor {
    type Error = Infallible;

    fn process(&mut self, session: &DebugSession) -> Result<Vec<ProcessingEdit>, Self::Error> {
        Ok(vec![ProcessingEdit::ReplaceDiagnostics {
            diagnostics: self.linter.lint(session.buffer()),
        }])
    }
}
