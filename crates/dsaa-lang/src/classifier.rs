//! Heuristic source-language classification.
//!
//! A [`PatternClassifier`] is an ordered list of `(regex, label)` pairs evaluated with
//! first-match-wins semantics. It is *not* a lexer: false positives and negatives are expected
//! (a C++ snippet inside a Python comment still classifies as C++).

use crate::LanguageLabel;
use regex::Regex;
use std::sync::LazyLock;

/// Maps raw source text to a [`LanguageLabel`].
///
/// Implementations must be total: every input string (including `""`) yields a label.
pub trait Classifier {
    /// Classify `text`.
    fn classify(&self, text: &str) -> LanguageLabel;
}

impl<F> Classifier for F
where
    F: Fn(&str) -> LanguageLabel,
{
    fn classify(&self, text: &str) -> LanguageLabel {
        self(text)
    }
}

/// A single classification rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    label: LanguageLabel,
}

impl PatternRule {
    /// Create a rule that yields `label` when `pattern` matches anywhere in the text.
    pub fn new(pattern: &str, label: LanguageLabel) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            label,
        })
    }

    /// The label produced by this rule.
    pub fn label(&self) -> LanguageLabel {
        self.label
    }

    /// Returns `true` if the rule matches `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Ordered, first-match-wins regex classifier.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    rules: Vec<PatternRule>,
    fallback: LanguageLabel,
}

impl PatternClassifier {
    /// Create a classifier from ordered rules and a fallback label.
    pub fn new(rules: Vec<PatternRule>, fallback: LanguageLabel) -> Self {
        Self { rules, fallback }
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// The label returned when no rule matches.
    pub fn fallback(&self) -> LanguageLabel {
        self.fallback
    }

    /// C++, Python and Java heuristics, falling back to JavaScript.
    pub fn standard() -> Result<Self, regex::Error> {
        let mut rules = Self::basic_rules()?;
        rules.push(PatternRule::new(
            r"\b(?:class|public|static|void)\b",
            LanguageLabel::Java,
        )?);
        Ok(Self::new(rules, LanguageLabel::JavaScript))
    }

    /// C++ and Python heuristics only, falling back to JavaScript.
    pub fn basic() -> Result<Self, regex::Error> {
        Ok(Self::new(Self::basic_rules()?, LanguageLabel::JavaScript))
    }

    fn basic_rules() -> Result<Vec<PatternRule>, regex::Error> {
        Ok(vec![
            // `#include`, `std::`, iostream idioms.
            PatternRule::new(r"#\s*include\b|std::|cout|cin", LanguageLabel::Cpp)?,
            PatternRule::new(r"\bdef\b|print\(|import", LanguageLabel::Python)?,
        ])
    }
}

impl Classifier for PatternClassifier {
    fn classify(&self, text: &str) -> LanguageLabel {
        self.rules
            .iter()
            .find(|rule| rule.matches(text))
            .map(PatternRule::label)
            .unwrap_or(self.fallback)
    }
}

static STANDARD: LazyLock<PatternClassifier> = LazyLock::new(|| {
    PatternClassifier::standard().expect("standard classifier patterns are valid")
});

/// Classify `text` with [`PatternClassifier::standard`].
pub fn classify(text: &str) -> LanguageLabel {
    STANDARD.classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_default() {
        assert_eq!(classify(""), LanguageLabel::default());
        assert_eq!(classify(""), LanguageLabel::JavaScript);
    }

    #[test]
    fn test_include_wins_over_everything() {
        let text = "#include <vector>\nimport os\ndef f(): pass\npublic class A {}";
        assert_eq!(classify(text), LanguageLabel::Cpp);
        assert_eq!(classify("x = 1\n  #  include \"a.h\""), LanguageLabel::Cpp);
    }

    #[test]
    fn test_cpp_stream_idioms() {
        assert_eq!(classify("std::vector<int> v;"), LanguageLabel::Cpp);
        assert_eq!(classify("cout << x;"), LanguageLabel::Cpp);
    }

    #[test]
    fn test_python() {
        assert_eq!(classify("def main():\n    return 1"), LanguageLabel::Python);
        assert_eq!(classify("print(42)"), LanguageLabel::Python);
        // `import` is matched anywhere, including JS module syntax.
        assert_eq!(classify("import x from 'y';"), LanguageLabel::Python);
    }

    #[test]
    fn test_java() {
        assert_eq!(
            classify("public class Main { static void run() {} }"),
            LanguageLabel::Java
        );
        assert_eq!(classify("classification"), LanguageLabel::JavaScript);
    }

    #[test]
    fn test_false_positive_inside_comment() {
        // Heuristic: a C++ token in a Python comment still triggers C++.
        assert_eq!(classify("# uses std::sort\ndef f(): pass"), LanguageLabel::Cpp);
        assert_eq!(classify("let cinema = 1;"), LanguageLabel::Cpp);
    }

    #[test]
    fn test_basic_has_no_java_rule() {
        let basic = PatternClassifier::basic().unwrap();
        assert_eq!(basic.rules().len(), 2);
        assert_eq!(basic.classify("public void run()"), LanguageLabel::JavaScript);
    }

    #[test]
    fn test_closure_classifier() {
        let always_java = |_: &str| LanguageLabel::Java;
        assert_eq!(always_java.classify("anything"), LanguageLabel::Java);
    }

    #[test]
    fn test_plain_javascript() {
        assert_eq!(
            classify("const a = [1, 2, 3].map((x) => x * 2);"),
            LanguageLabel::JavaScript
        );
    }
}
