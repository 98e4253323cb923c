#![warn(missing_docs)]
//! dsaa-core - Headless Code Debugger Kernel
//!
//! # Overview
//!
//! `dsaa-core` holds the state behind a code-debugger view without doing any rendering. A host
//! (GUI, TUI, CLI) owns a [`DebugSession`], forwards document edits into it, and reads back
//! derived state: the detected language, the issue overlay decorations, diagnostics and the
//! current notice.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  DebugSession (state, versions, notices)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Processing edits (issues, diagnostics)     │  ← Integrations
//! ├─────────────────────────────────────────────┤
//! │  Overlay decorations (issues → lines)       │  ← Visual Enhancement
//! ├─────────────────────────────────────────────┤
//! │  SourceBuffer / LineIndex (Rope-based)      │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use dsaa_core::{Issue, Severity, SourceBuffer, compute_decorations};
//!
//! let doc = SourceBuffer::new("int main() {\n  return 0;\n}");
//! let issues = vec![
//!     Issue::new(2, Severity::Warning, "magic number"),
//!     Issue::new(9, Severity::Error, "no such line"),
//! ];
//!
//! let decorations = compute_decorations(&doc, &issues);
//! assert_eq!(decorations.len(), 1);
//! assert_eq!(decorations[0].target_line_start, 13);
//! assert_eq!(decorations[0].style_class, "dsaa-line-warning");
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - Rope based line index
//! - [`buffer`] - the session-owned source buffer (1-based line lookups)
//! - [`diagnostics`] - issues, diagnostics and severities
//! - [`decorations`] - issue overlay decorations
//! - [`processing`] - derived-state edits and the processor trait
//! - [`notice`] - single-slot transient notices
//! - [`session`] - session state and change notifications

pub mod buffer;
pub mod decorations;
pub mod diagnostics;
pub mod line_index;
pub mod notice;
pub mod processing;
pub mod session;

pub use buffer::SourceBuffer;
pub use decorations::{
    Decoration, STYLE_LINE_ERROR, STYLE_LINE_INFO, STYLE_LINE_WARNING, StyleClasses,
    compute_decorations, compute_decorations_with,
};
pub use diagnostics::{Diagnostic, DiagnosticRange, Issue, Priority, Severity};
pub use line_index::LineIndex;
pub use notice::{Notice, NoticeBoard, NoticeDurations};
pub use processing::{DocumentProcessor, ProcessingEdit};
pub use session::{
    DebugReport, DebugSession, DebugSubmission, NOTICE_DEBUG_SUCCEEDED, NOTICE_EMPTY_CODE,
    SessionChange, SessionChangeCallback, SessionChangeType, SessionError,
};
