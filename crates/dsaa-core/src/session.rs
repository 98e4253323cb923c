//! Debug session state
//!
//! A [`DebugSession`] is the headless counterpart of a debugger editor view. It exclusively owns
//! the [`SourceBuffer`] and every piece of state derived from it:
//!
//! - the detected [`LanguageLabel`] (which grammar the host should activate)
//! - the issue list from the last successful analysis, plus fix suggestions
//! - the decoration set overlaying those issues on the current text
//! - diagnostics from local processors
//! - a single transient notice
//!
//! # Recompute, never patch
//!
//! The language label and decoration set are treated as replaceable configuration: after every
//! document mutation and every issue replacement they are recomputed from scratch as a pure
//! function of `(document, issues)`. Issues keep their original line numbers, so after an edit
//! that shifts lines, an issue simply decorates whatever line now carries its number (or nothing,
//! if the document became shorter).
//!
//! Diagnostics carry character ranges into the text they were computed from, so an edit clears
//! them; run the processor again to refresh them.
//!
//! # Example
//!
//! ```rust
//! use dsaa_core::{DebugSession, Issue, Severity};
//! use dsaa_lang::LanguageLabel;
//!
//! let mut session = DebugSession::new("def f():\n    return 1\n");
//! assert_eq!(session.language(), LanguageLabel::Python);
//!
//! session.replace_issues(vec![Issue::new(2, Severity::Warning, "unused")]);
//! assert_eq!(session.decorations().len(), 1);
//!
//! session.set_text("x");
//! assert!(session.decorations().is_empty());
//! ```

use crate::buffer::SourceBuffer;
use crate::decorations::{Decoration, StyleClasses, compute_decorations_with};
use crate::diagnostics::{Diagnostic, Issue};
use crate::notice::{NoticeBoard, NoticeDurations};
use crate::processing::{DocumentProcessor, ProcessingEdit};
use dsaa_lang::{Classifier, LanguageLabel};
use serde::Serialize;
use std::ops::Range;
use std::time::Instant;
use thiserror::Error;

/// Notice shown when a debug run is requested on blank code.
pub const NOTICE_EMPTY_CODE: &str = "Please enter code before debugging.";
/// Notice shown when a debug run completes.
pub const NOTICE_DEBUG_SUCCEEDED: &str = "Debugging completed successfully!";

/// Errors produced by session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The buffer holds no code to analyze.
    #[error("the source buffer is empty")]
    EmptyCode,
}

/// Session change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChangeType {
    /// Document content modified
    DocumentModified,
    /// Detected language changed
    LanguageChanged,
    /// Issue list (and fix suggestions) replaced
    IssuesReplaced,
    /// Decoration set recomputed
    DecorationsChanged,
    /// Diagnostics replaced
    DiagnosticsChanged,
}

/// Session change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    /// Change type
    pub change_type: SessionChangeType,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
}

/// Session change callback function type
pub type SessionChangeCallback = Box<dyn FnMut(&SessionChange) + Send>;

/// The payload a host sends to an analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSubmission {
    /// Full source text.
    pub code: String,
    /// Detected language at submission time.
    pub language: LanguageLabel,
    /// Optional user-provided error output (may be empty).
    pub error_message: String,
}

/// The result of a successful debug run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugReport {
    /// Reported issues, in service order.
    pub issues: Vec<Issue>,
    /// Suggested fixes.
    pub fix_suggestions: Vec<String>,
    /// Optional short explanation.
    pub explanation: Option<String>,
}

/// Headless debugger view state.
pub struct DebugSession {
    buffer: SourceBuffer,
    classifier: Box<dyn Classifier + Send>,
    styles: StyleClasses,
    notice_durations: NoticeDurations,
    language: LanguageLabel,
    issues: Vec<Issue>,
    fix_suggestions: Vec<String>,
    explanation: Option<String>,
    diagnostics: Vec<Diagnostic>,
    decorations: Vec<Decoration>,
    notices: NoticeBoard,
    pending_requests: usize,
    version: u64,
    callbacks: Vec<SessionChangeCallback>,
}

impl DebugSession {
    /// Create a session over `text`, classified with [`dsaa_lang::classify`].
    pub fn new(text: &str) -> Self {
        let classifier: fn(&str) -> LanguageLabel = dsaa_lang::classify;
        Self::with_classifier(text, Box::new(classifier))
    }

    /// Create a session with a custom language classifier.
    pub fn with_classifier(text: &str, classifier: Box<dyn Classifier + Send>) -> Self {
        let buffer = SourceBuffer::new(text);
        let language = classifier.classify(text);
        Self {
            buffer,
            classifier,
            styles: StyleClasses::default(),
            notice_durations: NoticeDurations::default(),
            language,
            issues: Vec::new(),
            fix_suggestions: Vec::new(),
            explanation: None,
            diagnostics: Vec::new(),
            decorations: Vec::new(),
            notices: NoticeBoard::new(),
            pending_requests: 0,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Use `styles` for decoration style tokens (recomputes decorations).
    pub fn with_style_classes(mut self, styles: StyleClasses) -> Self {
        self.styles = styles;
        self.decorations = compute_decorations_with(&self.buffer, &self.issues, &self.styles);
        self
    }

    /// Use `durations` for completion notices.
    pub fn with_notice_durations(mut self, durations: NoticeDurations) -> Self {
        self.notice_durations = durations;
        self
    }

    /// The source buffer.
    pub fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    /// The complete text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// The language detected for the current text.
    pub fn language(&self) -> LanguageLabel {
        self.language
    }

    /// Issues from the last successful analysis.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Fix suggestions from the last successful analysis.
    pub fn fix_suggestions(&self) -> &[String] {
        &self.fix_suggestions
    }

    /// Explanation from the last successful analysis.
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Diagnostics from local processors.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The current decoration set.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// The current style classes.
    pub fn style_classes(&self) -> &StyleClasses {
        &self.styles
    }

    /// The notice board.
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// The visible notice at `now`, if any.
    pub fn notice(&self, now: Instant) -> Option<&str> {
        self.notices.current(now)
    }

    /// Returns `true` while at least one debug request is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    /// Current version (incremented once per state-changing operation).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Subscribe to session changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&SessionChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Replace the whole document.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.replace(text);
        self.document_changed();
    }

    /// Insert `text` at character `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) {
        self.buffer.insert(offset, text);
        self.document_changed();
    }

    /// Delete the character `range`.
    pub fn delete(&mut self, range: Range<usize>) {
        self.buffer.delete(range);
        self.document_changed();
    }

    /// Replace the issue list wholesale.
    pub fn replace_issues(&mut self, issues: Vec<Issue>) {
        self.issues = issues;
        self.issues_changed();
    }

    /// Apply processing edits produced by a [`DocumentProcessor`].
    pub fn apply_processing_edits<I>(&mut self, edits: I)
    where
        I: IntoIterator<Item = ProcessingEdit>,
    {
        for edit in edits {
            match edit {
                ProcessingEdit::ReplaceIssues { issues } => self.replace_issues(issues),
                ProcessingEdit::ClearIssues => self.replace_issues(Vec::new()),
                ProcessingEdit::ReplaceDiagnostics { diagnostics } => {
                    self.diagnostics = diagnostics;
                    self.bump(&[SessionChangeType::DiagnosticsChanged]);
                }
                ProcessingEdit::ClearDiagnostics => {
                    self.diagnostics.clear();
                    self.bump(&[SessionChangeType::DiagnosticsChanged]);
                }
            }
        }
    }

    /// Run `processor` against this session and apply its edits.
    pub fn run_processor<P>(&mut self, processor: &mut P) -> Result<(), P::Error>
    where
        P: DocumentProcessor,
    {
        let edits = processor.process(self)?;
        self.apply_processing_edits(edits);
        Ok(())
    }

    /// Start a debug run for the current text.
    ///
    /// Blank code is rejected with [`SessionError::EmptyCode`] and a notice. Otherwise the
    /// request is counted as in flight until [`Self::finish_debug`] is called for it. Runs are
    /// never cancelled; starting another while one is pending is allowed.
    pub fn prepare_debug_request(
        &mut self,
        error_message: &str,
        now: Instant,
    ) -> Result<DebugSubmission, SessionError> {
        if self.buffer.is_blank() {
            self.notices
                .show(NOTICE_EMPTY_CODE, self.notice_durations.success(), now);
            return Err(SessionError::EmptyCode);
        }

        self.pending_requests += 1;
        Ok(DebugSubmission {
            code: self.buffer.text(),
            language: self.language,
            error_message: error_message.to_string(),
        })
    }

    /// Complete a debug run.
    ///
    /// On success the issues, fix suggestions and explanation are replaced wholesale. On failure
    /// they are left untouched and the failure is surfaced as a notice.
    pub fn finish_debug(&mut self, result: Result<DebugReport, String>, now: Instant) {
        self.pending_requests = self.pending_requests.saturating_sub(1);

        match result {
            Ok(report) => {
                tracing::info!(
                    issues = report.issues.len(),
                    suggestions = report.fix_suggestions.len(),
                    "debug run completed"
                );
                self.fix_suggestions = report.fix_suggestions;
                self.explanation = report.explanation;
                self.issues = report.issues;
                self.notices.show(
                    NOTICE_DEBUG_SUCCEEDED,
                    self.notice_durations.success(),
                    now,
                );
                self.issues_changed();
            }
            Err(reason) => {
                tracing::warn!(%reason, "debug run failed");
                self.notices.show(
                    format!("Debug failed: {reason}"),
                    self.notice_durations.failure(),
                    now,
                );
            }
        }
    }

    fn document_changed(&mut self) {
        let old_language = self.language;
        self.language = self.classifier.classify(&self.buffer.text());
        self.decorations = compute_decorations_with(&self.buffer, &self.issues, &self.styles);

        tracing::debug!(
            lines = self.buffer.line_count(),
            language = %self.language,
            decorations = self.decorations.len(),
            "recomputed derived state after edit"
        );

        let mut changes = vec![SessionChangeType::DocumentModified];
        if old_language != self.language {
            changes.push(SessionChangeType::LanguageChanged);
        }
        changes.push(SessionChangeType::DecorationsChanged);
        // Diagnostic ranges describe the text they were computed for.
        if !self.diagnostics.is_empty() {
            self.diagnostics.clear();
            changes.push(SessionChangeType::DiagnosticsChanged);
        }
        self.bump(&changes);
    }

    fn issues_changed(&mut self) {
        self.decorations = compute_decorations_with(&self.buffer, &self.issues, &self.styles);
        let dropped = self.issues.len() - self.decorations.len();
        if dropped > 0 {
            tracing::debug!(dropped, "issues outside the document produced no decoration");
        }
        self.bump(&[
            SessionChangeType::IssuesReplaced,
            SessionChangeType::DecorationsChanged,
        ]);
    }

    fn bump(&mut self, change_types: &[SessionChangeType]) {
        let old_version = self.version;
        self.version += 1;
        for &change_type in change_types {
            let change = SessionChange {
                change_type,
                old_version,
                new_version: self.version,
            };
            for callback in &mut self.callbacks {
                callback(&change);
            }
        }
    }
}

impl std::fmt::Debug for DebugSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugSession")
            .field("buffer", &self.buffer)
            .field("language", &self.language)
            .field("issues", &self.issues.len())
            .field("decorations", &self.decorations.len())
            .field("diagnostics", &self.diagnostics.len())
            .field("pending_requests", &self.pending_requests)
            .field("version", &self.version)
            .finish()
    }
}
