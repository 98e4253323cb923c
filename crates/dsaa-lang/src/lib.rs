#![warn(missing_docs)]
//! `dsaa-lang` - language labels and source-language classification for `dsaa`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing or
//! highlighting systems. It provides:
//!
//! - [`LanguageLabel`]: the coarse, fixed set of languages a host can switch grammars between
//! - [`CommentConfig`]: per-language comment tokens
//! - [`Classifier`]: the stable interface for mapping raw text to a [`LanguageLabel`]
//! - [`PatternClassifier`]: an ordered, regex-based heuristic implementation of [`Classifier`]

pub mod classifier;

pub use classifier::{Classifier, PatternClassifier, PatternRule, classify};

use serde::{Deserialize, Serialize};

/// A coarse source-language label used to pick a syntax-highlighting grammar.
///
/// The label is derived, never stored: hosts recompute it from the current text on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLabel {
    /// The fallback label when no heuristic matches.
    #[default]
    JavaScript,
    /// C / C++ family.
    Cpp,
    /// Python family.
    Python,
    /// Java family.
    Java,
}

impl LanguageLabel {
    /// All labels, in declaration order.
    pub const ALL: [LanguageLabel; 4] = [
        LanguageLabel::JavaScript,
        LanguageLabel::Cpp,
        LanguageLabel::Python,
        LanguageLabel::Java,
    ];

    /// Stable wire identifier (`"javascript"`, `"cpp"`, `"python"`, `"java"`).
    pub fn id(self) -> &'static str {
        match self {
            LanguageLabel::JavaScript => "javascript",
            LanguageLabel::Cpp => "cpp",
            LanguageLabel::Python => "python",
            LanguageLabel::Java => "java",
        }
    }

    /// Parse a wire identifier (case-insensitive).
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.id().eq_ignore_ascii_case(id))
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            LanguageLabel::JavaScript => "JavaScript",
            LanguageLabel::Cpp => "C++",
            LanguageLabel::Python => "Python",
            LanguageLabel::Java => "Java",
        }
    }

    /// Comment tokens for this language.
    pub fn comment_config(self) -> CommentConfig {
        match self {
            LanguageLabel::Python => CommentConfig::line("#"),
            LanguageLabel::JavaScript | LanguageLabel::Cpp | LanguageLabel::Java => {
                CommentConfig::line_and_block("//", "/*", "*/")
            }
        }
    }
}

impl std::fmt::Display for LanguageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Comment tokens/config for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// Returns `true` if a line comment token is configured.
    pub fn has_line(&self) -> bool {
        self.line.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if both block comment tokens are configured.
    pub fn has_block(&self) -> bool {
        self.block_start.as_deref().is_some_and(|s| !s.is_empty())
            && self.block_end.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_ids_round_trip() {
        for label in LanguageLabel::ALL {
            assert_eq!(LanguageLabel::from_id(label.id()), Some(label));
        }
        assert_eq!(LanguageLabel::from_id(" CPP "), Some(LanguageLabel::Cpp));
        assert_eq!(LanguageLabel::from_id("rust"), None);
    }

    #[test]
    fn test_label_serde_uses_ids() {
        let json = serde_json::to_string(&LanguageLabel::Python).unwrap();
        assert_eq!(json, "\"python\"");
        let label: LanguageLabel = serde_json::from_str("\"java\"").unwrap();
        assert_eq!(label, LanguageLabel::Java);
    }

    #[test]
    fn test_comment_config() {
        assert!(LanguageLabel::Python.comment_config().has_line());
        assert!(!LanguageLabel::Python.comment_config().has_block());
        assert!(LanguageLabel::Cpp.comment_config().has_block());
    }
}
