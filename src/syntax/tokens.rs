//! Token tags for ABC highlighting
//!
//! Each tag names a lexical class of ABC notation. Tags drive coloring
//! only; they carry no musical meaning.

use super::style::{Color, Style};

/// Lexical classes recognized in ABC notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenTag {
    /// Header field key (`X:`, `T:`, `K:`)
    Header,
    /// Note letter with octave markers (`c'`, `A,,`)
    Note,
    /// Sharp, flat or natural (`^`, `_`, `=`, doubled)
    Accidental,
    /// Length modifier (`2`, `/4`)
    Duration,
    /// Rests (`z`, `x`, `Z`)
    Rest,
    /// Quoted chord symbol or annotation (`"Am"`)
    Chord,
    /// Slurs and ties
    Slur,
    /// Bar lines and repeat brackets
    Bar,
    /// `%` comment to end of line
    Comment,
    /// Anything else
    Plain,
}

impl TokenTag {
    /// All tags, in declaration order
    pub const ALL: [TokenTag; 10] = [
        TokenTag::Header,
        TokenTag::Note,
        TokenTag::Accidental,
        TokenTag::Duration,
        TokenTag::Rest,
        TokenTag::Chord,
        TokenTag::Slur,
        TokenTag::Bar,
        TokenTag::Comment,
        TokenTag::Plain,
    ];

    /// Get the default style for this tag
    pub fn default_style(&self) -> Style {
        match self {
            TokenTag::Header => Style::fg(Color::BrightBlue).with_bold(),
            TokenTag::Note => Style::fg(Color::Green),
            TokenTag::Accidental => Style::fg(Color::Magenta),
            TokenTag::Duration => Style::fg(Color::Cyan),
            TokenTag::Rest => Style::fg(Color::BrightBlack),
            TokenTag::Chord => Style::fg(Color::Yellow),
            TokenTag::Slur => Style::fg(Color::BrightMagenta),
            TokenTag::Bar => Style::fg(Color::BrightWhite).with_bold(),
            TokenTag::Comment => Style::fg(Color::BrightBlack).with_italic(),
            TokenTag::Plain => Style::default(),
        }
    }

    /// Get a human-readable name for this tag
    pub fn name(&self) -> &'static str {
        match self {
            TokenTag::Header => "Header",
            TokenTag::Note => "Note",
            TokenTag::Accidental => "Accidental",
            TokenTag::Duration => "Duration",
            TokenTag::Rest => "Rest",
            TokenTag::Chord => "Chord",
            TokenTag::Slur => "Slur",
            TokenTag::Bar => "Bar",
            TokenTag::Comment => "Comment",
            TokenTag::Plain => "Plain",
        }
    }

    /// Parse a tag from its name (theme keys in the config file)
    pub fn from_name(name: &str) -> Option<Self> {
        TokenTag::ALL.iter().copied().find(|tag| tag.name().eq_ignore_ascii_case(name))
    }
}
