//! Document text with char-offset addressing
//!
//! Hosts address the text by char offsets; storage is a single `String`,
//! so every edit converts offsets to byte positions first.

use unicode_width::UnicodeWidthStr;

/// The full text of one editor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    /// Length in chars
    len: usize,
}

impl Document {
    /// Create a document from text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self { text, len }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the document is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte position of a char offset. `len()` maps to the end of the text.
    pub fn char_to_byte(&self, offset: usize) -> Option<usize> {
        if offset == self.len {
            return Some(self.text.len());
        }
        self.text.char_indices().nth(offset).map(|(pos, _)| pos)
    }

    /// Text between two char offsets
    pub fn slice(&self, from: usize, to: usize) -> Option<&str> {
        if from > to {
            return None;
        }
        Some(&self.text[self.char_to_byte(from)?..self.char_to_byte(to)?])
    }

    /// Replace the chars in `from..to` with `replacement`.
    ///
    /// Returns false, leaving the text untouched, if the range is invalid.
    pub fn replace(&mut self, from: usize, to: usize, replacement: &str) -> bool {
        if from > to || to > self.len {
            return false;
        }
        let (Some(start), Some(end)) = (self.char_to_byte(from), self.char_to_byte(to)) else {
            return false;
        };
        self.text.replace_range(start..end, replacement);
        self.len = self.len - (to - from) + replacement.chars().count();
        true
    }

    /// Lines of the text, split on `\n`. A trailing newline yields an
    /// empty last line, so there is always at least one line.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split('\n').collect()
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Line index and char column of a char offset (clamped to the text)
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.text.chars().take(offset) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Char offset where a line starts (None if the line does not exist)
    pub fn line_start(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return Some(0);
        }
        let mut seen = 0;
        for (offset, ch) in self.text.chars().enumerate() {
            if ch == '\n' {
                seen += 1;
                if seen == line {
                    return Some(offset + 1);
                }
            }
        }
        None
    }

    /// Display column of a char offset within its line
    pub fn display_col(&self, offset: usize) -> usize {
        let (line, col) = self.line_col(offset);
        self.lines()
            .get(line)
            .map(|text| {
                let end = text.char_indices().nth(col).map_or(text.len(), |(pos, _)| pos);
                text[..end].width()
            })
            .unwrap_or(0)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
