//! ABC syntax classification
//!
//! This module provides the tokenizer and styling infrastructure used for:
//! - Token classification of ABC notation
//! - Per-line highlighting with cached scanner state
//! - Themes mapping token tags to styles

mod style;
mod tokens;
mod rules;
mod lexer;
mod manager;

pub use style::{Color, Span, Style, Theme};
pub use tokens::TokenTag;
pub use rules::{HighlightResult, ScannerState, Step};
pub use lexer::{AbcLexer, Steps, Token};
pub use manager::{HighlightCache, Highlighter};
