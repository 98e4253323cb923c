//! Logical line index
//!
//! Provides line access over a Rope data structure, with O(log N) line-to-offset conversion and
//! editing. All offsets are character offsets (Unicode scalar values), line numbers are 0-based.

use ropey::Rope;

/// Logical line index - implemented using Rope data structure
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index (one empty line)
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count
    ///
    /// An empty document has one line; a trailing newline opens a final empty line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total byte count
    pub fn byte_count(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character offset of the first character of `line`.
    ///
    /// Returns `None` when `line` is out of range.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line_to_char(line))
    }

    /// Character offset just past the last character of `line`, excluding its line break.
    pub fn line_end(&self, line: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        Some(start + self.line_len_chars(line))
    }

    /// Character length of `line`, excluding its line break.
    pub fn line_len_chars(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        let mut chars = slice.chars_at(len);
        // Strip `\n`, `\r\n` or a lone `\r`.
        if chars.prev() == Some('\n') {
            len -= 1;
            if chars.prev() == Some('\r') {
                len -= 1;
            }
        } else if len > 0 && slice.char(len - 1) == '\r' {
            len -= 1;
        }
        len
    }

    /// Get line number and offset within line from character offset
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);

        (line_idx, char_offset - line_start_char)
    }

    /// Get character offset from line number and column number
    ///
    /// Out-of-range lines clamp to the end of the document; columns clamp to the line length.
    pub fn position_to_char_offset(&self, line: usize, column: usize) -> usize {
        match self.line_start(line) {
            Some(start) => start + column.min(self.line_len_chars(line)),
            None => self.rope.len_chars(),
        }
    }

    /// Insert text (at specified character offset, clamped to the document end)
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete text range (character offset)
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = start_char.saturating_add(len_chars).min(self.rope.len_chars());

        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }

    /// Get complete text
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }

    /// Get text of the specified line (excluding its line break)
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        let start = self.line_start(line_number)?;
        let len = self.line_len_chars(line_number);
        Some(self.rope.slice(start..start + len).to_string())
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineIndex")
            .field("lines", &self.line_count())
            .field("chars", &self.char_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_index() {
        let index = LineIndex::new();
        assert_eq!(index.line_count(), 1); // Rope empty document has 1 line
        assert_eq!(index.byte_count(), 0);
        assert_eq!(index.char_count(), 0);
    }

    #[test]
    fn test_from_text() {
        let text = "Line 1\nLine 2\nLine 3";
        let index = LineIndex::from_text(text);

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.byte_count(), text.len());
        assert_eq!(index.char_count(), text.chars().count());
    }

    #[test]
    fn test_trailing_newline_opens_line() {
        let index = LineIndex::from_text("a\nb\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.get_line_text(2).as_deref(), Some(""));
    }

    #[test]
    fn test_line_start_and_end() {
        let index = LineIndex::from_text("ABC\r\nDE\nF");

        assert_eq!(index.line_start(0), Some(0));
        assert_eq!(index.line_end(0), Some(3));
        assert_eq!(index.line_start(1), Some(5));
        assert_eq!(index.line_end(1), Some(7));
        assert_eq!(index.line_start(2), Some(8));
        assert_eq!(index.line_end(2), Some(9));
        assert_eq!(index.line_start(3), None);
    }

    #[test]
    fn test_only_newline_and_carriage_return_break_lines() {
        let index = LineIndex::from_text("int a;\x0C\nint b;\x0B\u{85}\nint c;");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.get_line_text(2).as_deref(), Some("int c;"));

        let index = LineIndex::from_text("a\u{2028}b\u{2029}c\nd");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_len_chars(0), 5);
        assert_eq!(index.line_start(1), Some(6));

        let index = LineIndex::from_text("a\rb\r\nc");
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn test_char_offset_to_position() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.char_offset_to_position(0), (0, 0)); // A
        assert_eq!(index.char_offset_to_position(2), (0, 2)); // C
        assert_eq!(index.char_offset_to_position(4), (1, 0)); // D
        assert_eq!(index.char_offset_to_position(8), (2, 0)); // G
    }

    #[test]
    fn test_position_to_char_offset() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.position_to_char_offset(0, 2), 2); // C
        assert_eq!(index.position_to_char_offset(1, 0), 4); // D
        assert_eq!(index.position_to_char_offset(1, 99), 7); // clamped
        assert_eq!(index.position_to_char_offset(9, 0), 11); // past the end
    }

    #[test]
    fn test_utf8_cjk() {
        let index = LineIndex::from_text("你好\n世界");

        assert_eq!(index.line_count(), 2);
        assert_eq!(index.char_count(), 5);
        assert_eq!(index.line_start(1), Some(3));
        assert_eq!(index.get_line_text(1).as_deref(), Some("世界"));
    }

    #[test]
    fn test_insert_delete_text() {
        let mut index = LineIndex::from_text("Hello World");

        index.insert(6, "Beautiful ");
        assert_eq!(index.get_text(), "Hello Beautiful World");

        index.delete(6, 10);
        assert_eq!(index.get_text(), "Hello World");

        index.delete(5, usize::MAX);
        assert_eq!(index.get_text(), "Hello");
    }
}
