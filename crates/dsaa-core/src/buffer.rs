//! The mutable source buffer owned by an editing session.
//!
//! [`SourceBuffer`] is an ordered sequence of characters partitioned into lines. It exposes
//! 1-based line lookups (the numbering used by issues coming from analysis services) on top of
//! the 0-based [`LineIndex`].

use crate::line_index::LineIndex;
use std::ops::Range;

/// An exclusively-owned, mutable text buffer.
#[derive(Debug, Default)]
pub struct SourceBuffer {
    index: LineIndex,
}

impl SourceBuffer {
    /// Create a buffer holding `text`.
    pub fn new(text: &str) -> Self {
        Self {
            index: LineIndex::from_text(text),
        }
    }

    /// The underlying line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }

    /// The complete text.
    pub fn text(&self) -> String {
        self.index.get_text()
    }

    /// Returns `true` if the buffer holds only whitespace (or nothing).
    pub fn is_blank(&self) -> bool {
        self.lines().all(|line| line.trim().is_empty())
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.index.char_count()
    }

    /// Number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    /// Character offset of the start of 1-based `line`.
    ///
    /// Returns `None` for line `0` or any line past [`Self::line_count`].
    pub fn line_start_1based(&self, line: usize) -> Option<usize> {
        let zero_based = line.checked_sub(1)?;
        self.index.line_start(zero_based)
    }

    /// Character span of 1-based `line`, excluding its line break.
    pub fn line_span_1based(&self, line: usize) -> Option<Range<usize>> {
        let zero_based = line.checked_sub(1)?;
        let start = self.index.line_start(zero_based)?;
        let end = self.index.line_end(zero_based)?;
        Some(start..end)
    }

    /// Iterate over line texts (line breaks excluded), in order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.index.line_count()).filter_map(|line| self.index.get_line_text(line))
    }

    /// Insert `text` at character `offset` (clamped to the end of the buffer).
    pub fn insert(&mut self, offset: usize, text: &str) {
        self.index.insert(offset, text);
    }

    /// Delete the character `range` (clamped to the buffer).
    pub fn delete(&mut self, range: Range<usize>) {
        let len = range.end.saturating_sub(range.start);
        self.index.delete(range.start, len);
    }

    /// Replace the whole content.
    pub fn replace(&mut self, text: &str) {
        self.index = LineIndex::from_text(text);
    }
}

impl From<&str> for SourceBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
