//! Styled terminal output using crossterm

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::error::Result;
use crate::syntax::{Color, Style};

/// Line-oriented styled writer
pub struct Terminal<W: Write> {
    out: W,
    /// Terminal width in columns
    cols: u16,
    /// Whether styles are emitted at all
    color: bool,
}

impl Terminal<io::Stdout> {
    /// Terminal on stdout, sized to the real terminal when there is one
    pub fn stdout(color: bool) -> Self {
        let cols = terminal::size().map(|(cols, _)| cols).unwrap_or(80);
        Self::new(io::stdout(), cols, color)
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, cols: u16, color: bool) -> Self {
        Self { out, cols, color }
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// Write a string in a style, restoring plain attributes afterwards
    pub fn write_styled(&mut self, s: &str, style: &Style) -> Result<()> {
        if !self.color || style.is_default() {
            return self.write_str(s);
        }
        self.apply_style(style)?;
        self.write_str(s)?;
        self.reset_attributes()
    }

    /// End the current line
    pub fn newline(&mut self) -> Result<()> {
        self.write_str("\n")
    }

    /// Set dim/faint mode (for line numbers, etc.)
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        if !self.color {
            return Ok(());
        }
        if enabled {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        } else {
            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
        }
        Ok(())
    }

    /// Set reverse video mode
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        if !self.color {
            return Ok(());
        }
        if enabled {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        } else {
            queue!(self.out, SetAttribute(Attribute::NoReverse))?;
        }
        Ok(())
    }

    /// Apply colors and attributes of a style
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        if style.fg != Color::Default {
            queue!(self.out, SetForegroundColor(term_color(style.fg)))?;
        }
        if style.bg != Color::Default {
            queue!(self.out, SetBackgroundColor(term_color(style.bg)))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if style.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Consume the terminal, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}
