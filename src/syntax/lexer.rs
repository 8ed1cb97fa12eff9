//! Single-pass lexer for ABC notation
//!
//! `AbcLexer::step` consumes the longest meaningful prefix at a scan
//! position and classifies it. Rules are tried in priority order and the
//! first match wins, so a letter that could start a header field is only
//! a header at the start of a line inside the header region.

use super::rules::{HighlightResult, PatternRule, ScannerState, Step};
use super::style::Span;
use super::tokens::TokenTag;

/// A classified lexical span, in char offsets
pub type Token = Span;

/// When a rule is allowed to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    Always,
    /// Only at the start of a line while still in the header region
    HeaderLineStart,
}

struct LexRule {
    rule: PatternRule,
    guard: Guard,
    ends_header: bool,
}

/// The ABC tokenizer
pub struct AbcLexer {
    /// Rules sorted by priority (highest first)
    rules: Vec<LexRule>,
}

impl AbcLexer {
    /// Create the lexer with the built-in ABC rules
    pub fn new() -> Self {
        let mut lexer = Self { rules: Vec::new() };

        lexer.add(r"^[A-Za-z]:", TokenTag::Header, "header_field", 100, Guard::HeaderLineStart, false);
        // Recognized anywhere, not only at line start.
        lexer.add(r"^K:", TokenTag::Header, "key_field", 95, Guard::Always, true);
        lexer.add(r"^%[^\n]*", TokenTag::Comment, "comment", 90, Guard::Always, false);
        lexer.add(r"^[|:\[\]]", TokenTag::Bar, "bar", 85, Guard::Always, false);
        lexer.add(r"^[A-Ga-g][',]*", TokenTag::Note, "note", 80, Guard::Always, false);
        lexer.add(r"^[\^=_]{1,2}", TokenTag::Accidental, "accidental", 75, Guard::Always, false);
        lexer.add(r"^/?[0-9]+", TokenTag::Duration, "duration", 70, Guard::Always, false);
        lexer.add(r"^[zxZ]", TokenTag::Rest, "rest", 65, Guard::Always, false);
        // Unterminated chords run to end of input.
        lexer.add(r#"^"[^"]*"?"#, TokenTag::Chord, "chord", 60, Guard::Always, false);
        lexer.add(r"^[()\-]", TokenTag::Slur, "slur", 55, Guard::Always, false);

        lexer
    }

    fn add(&mut self, pattern: &str, tag: TokenTag, name: &str, priority: i32, guard: Guard, ends_header: bool) {
        if let Some(rule) = PatternRule::new(name, pattern, tag, priority) {
            self.rules.push(LexRule { rule, guard, ends_header });
            self.rules.sort_by(|a, b| b.rule.priority.cmp(&a.rule.priority));
        }
    }

    /// Scan one step at byte position `pos`.
    ///
    /// Consumes at least one char whenever `pos < text.len()`. At or past
    /// the end an empty step is returned and the state is unchanged.
    pub fn step(&self, text: &str, pos: usize, state: ScannerState) -> (Step, ScannerState) {
        let rest = match text.get(pos..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => return (Step { start: pos, end: pos, tag: None }, state),
        };

        let ws: usize = rest
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        if ws > 0 {
            return (Step { start: pos, end: pos + ws, tag: None }, state);
        }

        let line_start = pos == 0 || text[..pos].ends_with('\n');

        for lex in &self.rules {
            if lex.guard == Guard::HeaderLineStart && !(line_start && state.in_header) {
                continue;
            }
            if let Some(len) = lex.rule.match_len(text, pos) {
                let end = pos + len;
                let key_field = lex.rule.tag == TokenTag::Header && &text[pos..end] == "K:";
                let next = if lex.ends_header || key_field {
                    state.end_header()
                } else {
                    state
                };
                return (Step { start: pos, end, tag: Some(lex.rule.tag) }, next);
            }
        }

        let len = rest.chars().next().map_or(1, char::len_utf8);
        (Step { start: pos, end: pos + len, tag: Some(TokenTag::Plain) }, state)
    }

    /// Iterate over every step of `text`, whitespace skips included
    pub fn steps<'a>(&'a self, text: &'a str) -> Steps<'a> {
        self.steps_from(text, ScannerState::default())
    }

    /// Iterate over the steps of `text` starting from a given state
    pub fn steps_from<'a>(&'a self, text: &'a str, state: ScannerState) -> Steps<'a> {
        Steps {
            lexer: self,
            text,
            pos: 0,
            state,
        }
    }

    /// Iterate over the tokens of `text`.
    ///
    /// Token offsets count chars, the same unit as selections, so a token
    /// can be handed straight to a selection request.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token> + 'a {
        let mut offset = 0;
        self.steps(text).filter_map(move |step| {
            let start = offset;
            offset += text[step.start..step.end].chars().count();
            step.tag.map(|tag| Span::new(start, offset, tag))
        })
    }

    /// Highlight a single line of text
    ///
    /// Takes the state from the end of the previous line and returns the
    /// spans plus the state for the next line.
    pub fn highlight_line(&self, text: &str, prev_state: ScannerState) -> HighlightResult {
        let mut steps = self.steps_from(text, prev_state);
        let spans = steps
            .by_ref()
            .filter_map(|step| step.tag.map(|tag| Span::new(step.start, step.end, tag)))
            .collect();

        HighlightResult {
            spans,
            end_state: steps.state(),
        }
    }
}

impl Default for AbcLexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over scan steps
pub struct Steps<'a> {
    lexer: &'a AbcLexer,
    text: &'a str,
    pos: usize,
    state: ScannerState,
}

impl<'a> Steps<'a> {
    /// Scanner state after the steps consumed so far
    pub fn state(&self) -> ScannerState {
        self.state
    }
}

impl<'a> Iterator for Steps<'a> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.pos >= self.text.len() {
            return None;
        }
        let (step, state) = self.lexer.step(self.text, self.pos, self.state);
        if step.is_empty() {
            return None;
        }
        self.pos = step.end;
        self.state = state;
        Some(step)
    }
}
