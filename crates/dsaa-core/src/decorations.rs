//! Issue overlay decorations.
//!
//! A [`Decoration`] is a per-line visual annotation anchored at the character offset where a
//! line starts. Decorations are purely derived from `(SourceBuffer, [Issue])` and are always
//! recomputed from scratch via [`compute_decorations`]; they are never incrementally patched.

use crate::buffer::SourceBuffer;
use crate::diagnostics::{Issue, Severity};
use serde::{Deserialize, Serialize};

/// Severity -> style token mapping used when building decorations.
///
/// These are only identifiers. The host/theme layer maps them to actual colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleClasses {
    /// Style token for [`Severity::Error`].
    pub error: String,
    /// Style token for [`Severity::Warning`].
    pub warning: String,
    /// Style token for [`Severity::Info`].
    pub info: String,
}

impl Default for StyleClasses {
    fn default() -> Self {
        Self {
            error: STYLE_LINE_ERROR.to_string(),
            warning: STYLE_LINE_WARNING.to_string(),
            info: STYLE_LINE_INFO.to_string(),
        }
    }
}

impl StyleClasses {
    /// The style token for `severity`.
    pub fn for_severity(&self, severity: Severity) -> &str {
        match severity {
            Severity::Error => &self.error,
            Severity::Warning => &self.warning,
            Severity::Info => &self.info,
        }
    }
}

/// Default style token for error lines.
pub const STYLE_LINE_ERROR: &str = "dsaa-line-error";
/// Default style token for warning lines.
pub const STYLE_LINE_WARNING: &str = "dsaa-line-warning";
/// Default style token for informational lines.
pub const STYLE_LINE_INFO: &str = "dsaa-line-info";

/// A single line decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoration {
    /// 1-based line the decoration targets.
    pub line: usize,
    /// Character offset of the start of the target line.
    pub target_line_start: usize,
    /// Style token derived from the issue severity.
    pub style_class: String,
    /// Tooltip text (the issue message).
    pub tooltip: String,
}

/// Compute line decorations for `issues` against the current `doc`, using default styles.
///
/// See [`compute_decorations_with`].
pub fn compute_decorations(doc: &SourceBuffer, issues: &[Issue]) -> Vec<Decoration> {
    compute_decorations_with(doc, issues, &StyleClasses::default())
}

/// Compute line decorations for `issues` against the current `doc`.
///
/// - Issues are processed in input order and the output preserves that order.
/// - An issue whose line is `0` or exceeds `doc.line_count()` is skipped silently.
/// - Decorations targeting the same line are not merged; hosts apply them in order, so the
///   last one wins.
pub fn compute_decorations_with(
    doc: &SourceBuffer,
    issues: &[Issue],
    styles: &StyleClasses,
) -> Vec<Decoration> {
    let mut out = Vec::with_capacity(issues.len());
    for issue in issues {
        let line = issue.line as usize;
        let Some(target_line_start) = doc.line_start_1based(line) else {
            continue;
        };
        out.push(Decoration {
            line,
            target_line_start,
            style_class: styles.for_severity(issue.severity).to_string(),
            tooltip: issue.message.clone(),
        });
    }
    out
}
