//! Pattern rules and scanner state for the ABC lexer
//!
//! Rules are anchored regexes tried in priority order at the current
//! scan position. The scanner state is a plain value threaded through
//! every step.

use regex::Regex;

use super::tokens::TokenTag;

/// A single anchored pattern rule
///
/// The pattern must start with `^` so it only matches at the scan position.
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Tag to assign to matches
    pub tag: TokenTag,
    /// Priority (higher = matched first)
    pub priority: i32,
}

impl PatternRule {
    /// Create a new pattern rule
    pub fn new(name: &str, pattern: &str, tag: TokenTag, priority: i32) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name: name.to_string(),
            pattern: regex,
            tag,
            priority,
        })
    }

    /// Byte length of the match at `start`, if the rule matches there
    pub fn match_len(&self, text: &str, start: usize) -> Option<usize> {
        if start >= text.len() {
            return None;
        }
        self.pattern
            .find(&text[start..])
            .filter(|m| m.start() == 0 && !m.is_empty())
            .map(|m| m.end())
    }
}

/// Scanner state carried from one step to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerState {
    /// Still inside the header region (before `K:`)
    pub in_header: bool,
}

impl ScannerState {
    /// State after the header region has ended
    pub fn body() -> Self {
        Self { in_header: false }
    }

    /// Leave the header region. One-way.
    pub fn end_header(self) -> Self {
        Self::body()
    }
}

impl Default for ScannerState {
    fn default() -> Self {
        Self { in_header: true }
    }
}

/// One scan step: a consumed span and its tag.
///
/// `tag` is `None` for skipped whitespace, which produces no token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub start: usize,
    pub end: usize,
    pub tag: Option<TokenTag>,
}

impl Step {
    /// Number of bytes consumed
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if nothing was consumed
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Result of highlighting a single line
#[derive(Debug)]
pub struct HighlightResult {
    /// Tagged spans in this line
    pub spans: Vec<super::style::Span>,
    /// State at end of line (for next line)
    pub end_state: ScannerState,
}
