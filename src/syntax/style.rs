//! Style types for highlighted output
//!
//! Colors and attributes for token tags and the selection, plus the
//! theme that maps each tag to a style.

use std::collections::HashMap;

use super::tokens::TokenTag;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color name as written in the config file (`bright-blue`)
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a reverse video style (for selections)
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `top` over this style: its colors win where set and its
    /// attributes are added.
    pub fn overlay(self, top: Style) -> Self {
        Self {
            fg: if top.fg == Color::Default { self.fg } else { top.fg },
            bg: if top.bg == Color::Default { self.bg } else { top.bg },
            bold: self.bold || top.bold,
            italic: self.italic || top.italic,
            underline: self.underline || top.underline,
            reverse: self.reverse || top.reverse,
        }
    }

    /// Parse a style description such as `"bright-blue bold"`.
    ///
    /// The first color word sets the foreground, an `on-<color>` word sets
    /// the background. Unknown words make the whole description invalid.
    pub fn parse(desc: &str) -> Option<Self> {
        let mut style = Style::default();
        for word in desc.split_whitespace() {
            match word.to_ascii_lowercase().as_str() {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "reverse" => style.reverse = true,
                other => {
                    if let Some(bg) = other.strip_prefix("on-") {
                        style.bg = Color::from_name(bg)?;
                    } else {
                        style.fg = Color::from_name(other)?;
                    }
                }
            }
        }
        Some(style)
    }
}

/// A tagged span of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset where this span starts (inclusive). Bytes for highlight
    /// spans, chars for tokens.
    pub start: usize,
    /// Offset where this span ends (exclusive)
    pub end: usize,
    pub tag: TokenTag,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, tag: TokenTag) -> Self {
        Self { start, end, tag }
    }

    /// Check if this span contains an offset
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Styles per token tag, plus the selection style
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    styles: HashMap<TokenTag, Style>,
    pub selection: Style,
}

impl Theme {
    /// Style for a tag, falling back to the tag's default
    pub fn style_for(&self, tag: TokenTag) -> Style {
        self.styles.get(&tag).copied().unwrap_or_else(|| tag.default_style())
    }

    /// Override the style of one tag
    pub fn set_style(&mut self, tag: TokenTag, style: Style) {
        self.styles.insert(tag, style);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            styles: TokenTag::ALL.iter().map(|tag| (*tag, tag.default_style())).collect(),
            selection: Style::reverse(),
        }
    }
}
