//! Generic document processing interfaces.
//!
//! This module defines a shared "edit" format for derived session state, such as:
//! - issues reported by an analysis service
//! - diagnostics produced by local processors (linters)
//!
//! Processors produce [`ProcessingEdit`] values and the caller applies them to a
//! [`DebugSession`] via [`DebugSession::apply_processing_edits`].

use crate::DebugSession;
use crate::diagnostics::{Diagnostic, Issue};

/// A change to derived session state.
#[derive(Debug, Clone)]
pub enum ProcessingEdit {
    /// Replace the issue list wholesale.
    ReplaceIssues {
        /// The complete set of issues, in reporting order.
        issues: Vec<Issue>,
    },
    /// Clear all issues.
    ClearIssues,
    /// Replace the diagnostic list wholesale.
    ReplaceDiagnostics {
        /// The complete set of diagnostics.
        diagnostics: Vec<Diagnostic>,
    },
    /// Clear all diagnostics.
    ClearDiagnostics,
}

/// A generic processor that produces [`ProcessingEdit`]s for a session.
pub trait DocumentProcessor {
    /// The error type returned by [`DocumentProcessor::process`].
    type Error;

    /// Compute derived state updates to apply to the session.
    ///
    /// Implementations should avoid mutating `session`; instead, return edits that the caller can
    /// apply (e.g. via [`DebugSession::apply_processing_edits`]).
    fn process(&mut self, session: &DebugSession) -> Result<Vec<ProcessingEdit>, Self::Error>;
}
