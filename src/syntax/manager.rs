//! Per-line highlighting with a state cache
//!
//! Hosts that highlight line by line keep the scanner state at the end of
//! every line so a change only invalidates the lines after it.

use super::lexer::AbcLexer;
use super::rules::ScannerState;
use super::style::Span;

/// Per-document highlighting cache
#[derive(Debug, Default)]
pub struct HighlightCache {
    /// Scanner state at the end of each line (None = not computed)
    pub line_states: Vec<Option<ScannerState>>,
    /// Cached spans per line (None = not computed)
    pub line_spans: Vec<Option<Vec<Span>>>,
    /// First line that needs recomputation
    pub invalid_from: usize,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate cache from a specific line onwards
    pub fn invalidate_from(&mut self, line: usize) {
        self.invalid_from = self.invalid_from.min(line);
        for i in line..self.line_spans.len() {
            self.line_spans[i] = None;
            self.line_states[i] = None;
        }
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.invalid_from = 0;
        self.line_states.clear();
        self.line_spans.clear();
    }

    /// Resize cache vectors to the line count
    pub fn ensure_size(&mut self, line_count: usize) {
        self.line_states.resize(line_count, None);
        self.line_spans.resize(line_count, None);
        self.invalid_from = self.invalid_from.min(line_count);
    }
}

/// Line-oriented highlighter over the ABC lexer
pub struct Highlighter {
    lexer: AbcLexer,
    cache: HighlightCache,
    /// Whether highlighting is enabled
    pub enabled: bool,
}

impl Highlighter {
    /// Create a highlighter with an empty cache
    pub fn new() -> Self {
        Self {
            lexer: AbcLexer::new(),
            cache: HighlightCache::new(),
            enabled: true,
        }
    }

    /// Drop cached results from `line` onwards (call after an edit)
    pub fn invalidate_from(&mut self, line: usize) {
        self.cache.invalidate_from(line);
    }

    /// Drop all cached results (call after replacing the document)
    pub fn invalidate_all(&mut self) {
        self.cache.invalidate_all();
    }

    /// Spans for line `line_idx` of `lines`, using the cache when possible.
    ///
    /// Empty when highlighting is disabled or the index is out of range.
    pub fn line_spans(&mut self, lines: &[&str], line_idx: usize) -> Vec<Span> {
        if !self.enabled || line_idx >= lines.len() {
            return Vec::new();
        }

        self.cache.ensure_size(lines.len());
        self.compute_up_to(lines, line_idx);

        self.cache.line_spans[line_idx].clone().unwrap_or_default()
    }

    /// Compute every uncached line up to and including `line_idx`
    fn compute_up_to(&mut self, lines: &[&str], line_idx: usize) {
        let mut state = if self.cache.invalid_from == 0 {
            ScannerState::default()
        } else {
            self.cache.line_states[self.cache.invalid_from - 1].unwrap_or_default()
        };

        for (idx, text) in lines.iter().enumerate().take(line_idx + 1).skip(self.cache.invalid_from) {
            let result = self.lexer.highlight_line(text, state);
            state = result.end_state;
            self.cache.line_states[idx] = Some(result.end_state);
            self.cache.line_spans[idx] = Some(result.spans);
        }

        self.cache.invalid_from = self.cache.invalid_from.max(line_idx + 1);
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
