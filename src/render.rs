//! Viewport rendering
//!
//! Draws the visible lines of an `EditorView` with token colors and the
//! selection overlaid, followed by a mode line.

use std::io::Write;

use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::sync::EditorHandle;
use crate::syntax::{Highlighter, Style, Theme};
use crate::terminal::Terminal;
use crate::view::EditorView;

/// Renders views to a terminal
pub struct Renderer {
    pub theme: Theme,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    highlighter: Highlighter,
    /// View revision the highlight cache was built from
    rendered_revision: Option<u64>,
}

impl Renderer {
    pub fn new(theme: Theme, show_line_numbers: bool, highlight: bool) -> Self {
        let mut highlighter = Highlighter::new();
        highlighter.enabled = highlight;
        Self {
            theme,
            show_line_numbers,
            highlighter,
            rendered_revision: None,
        }
    }

    /// Forget cached highlighting (call after the document changed)
    pub fn invalidate(&mut self) {
        self.highlighter.invalidate_all();
    }

    /// Calculate width needed for line numbers (including separator)
    fn line_number_width(&self, line_count: usize) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let digits = line_count.max(1).to_string().len();
        digits.max(3) + 1
    }

    /// Render the viewport and mode line
    pub fn render<W: Write>(&mut self, terminal: &mut Terminal<W>, view: &EditorView, name: &str) -> Result<()> {
        if self.rendered_revision != Some(view.revision()) {
            self.invalidate();
            self.rendered_revision = Some(view.revision());
        }

        let doc = view.document();
        let lines = doc.lines();
        let cols = terminal.cols() as usize;
        let lnum_width = self.line_number_width(lines.len());
        let text_cols = cols.saturating_sub(lnum_width);
        let selection = view.selection();

        for line_idx in view.top_line()..(view.top_line() + view.height()).min(lines.len()) {
            if self.show_line_numbers {
                terminal.set_dim(true)?;
                terminal.write_str(&format!("{:>width$} ", line_idx + 1, width = lnum_width - 1))?;
                terminal.set_dim(false)?;
            }

            let text = lines[line_idx];
            let spans = self.highlighter.line_spans(&lines, line_idx);
            let line_start = doc.line_start(line_idx).unwrap_or(0);

            let mut run = String::new();
            let mut run_style = Style::default();
            let mut width = 0;

            for (char_idx, (byte_pos, ch)) in text.char_indices().enumerate() {
                let ch_width = ch.width().unwrap_or(1);
                if width + ch_width > text_cols {
                    break;
                }
                width += ch_width;

                let mut style = spans
                    .iter()
                    .find(|span| span.contains(byte_pos))
                    .map(|span| self.theme.style_for(span.tag))
                    .unwrap_or_default();
                let offset = line_start + char_idx;
                if offset >= selection.from && offset < selection.to {
                    style = style.overlay(self.theme.selection);
                }

                if style != run_style && !run.is_empty() {
                    terminal.write_styled(&run, &run_style)?;
                    run.clear();
                }
                run_style = style;
                run.push(ch);
            }
            if !run.is_empty() {
                terminal.write_styled(&run, &run_style)?;
            }
            terminal.newline()?;
        }

        self.render_mode_line(terminal, view, name, cols)?;
        terminal.flush()
    }

    /// Render the mode line for a view
    fn render_mode_line<W: Write>(
        &self,
        terminal: &mut Terminal<W>,
        view: &EditorView,
        name: &str,
        cols: usize,
    ) -> Result<()> {
        let doc = view.document();
        let selection = view.selection();
        let (line, _) = doc.line_col(view.cursor());
        let col = doc.display_col(view.cursor());

        let modified = if view.is_modified() { "**" } else { "--" };
        let access = if view.is_editable() { "" } else { " [read-only]" };
        let mode_line = format!(
            "{} abcedit: {}{} L{} C{} sel {}..{} ",
            modified,
            name,
            access,
            line + 1,
            col + 1,
            selection.from,
            selection.to
        );

        let padded = if mode_line.len() < cols {
            format!("{}{}", mode_line, "-".repeat(cols - mode_line.len()))
        } else {
            truncate_to_width(&mode_line, cols)
        };

        terminal.set_reverse(true)?;
        terminal.write_str(&padded)?;
        terminal.set_reverse(false)?;
        terminal.newline()
    }
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SelectionRange;

    fn render_plain(view: &EditorView, line_numbers: bool, cols: u16) -> String {
        let mut renderer = Renderer::new(Theme::default(), line_numbers, true);
        let mut term = Terminal::new(Vec::new(), cols, false);
        renderer.render(&mut term, view, "tune.abc").unwrap();
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn test_render_viewport_plain() {
        let view = EditorView::new("X:1\nK:C\nABC|", 2);
        let out = render_plain(&view, false, 40);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "X:1");
        assert_eq!(lines[1], "K:C");
        assert!(lines[2].starts_with("-- abcedit: tune.abc L1 C1 sel 0..0 "));
        assert_eq!(lines[2].len(), 40);
    }

    #[test]
    fn test_render_line_numbers_and_truncation() {
        let view = EditorView::new("ABCDEFGHIJ", 5);
        let out = render_plain(&view, true, 8);
        assert_eq!(out.lines().next(), Some("  1 ABCD"));
    }

    #[test]
    fn test_render_colored_selection() {
        let mut view = EditorView::new("K:C\nABC", 5);
        view.set_selection(SelectionRange::new(4, 5));
        let mut renderer = Renderer::new(Theme::default(), false, true);
        let mut term = Terminal::new(Vec::new(), 40, true);
        renderer.render(&mut term, &view, "t").unwrap();
        let out = String::from_utf8(term.into_inner()).unwrap();

        // Reverse video (SGR 7) marks the selected note.
        assert!(out.contains("\u{1b}[7m"));
        assert!(out.contains("sel 4..5"));
    }

    #[test]
    fn test_rerender_after_edit_rehighlights() {
        let mut view = EditorView::new("X:1\nT:a", 5);
        let mut renderer = Renderer::new(Theme::default(), false, true);
        let mut term = Terminal::new(Vec::new(), 40, true);
        renderer.render(&mut term, &view, "t").unwrap();

        view.move_cursor_to(0);
        assert!(view.insert_str("K:C\n"));
        let mut term = Terminal::new(Vec::new(), 40, true);
        renderer.render(&mut term, &view, "t").unwrap();
        let reused = String::from_utf8(term.into_inner()).unwrap();

        let mut fresh = Renderer::new(Theme::default(), false, true);
        let mut term = Terminal::new(Vec::new(), 40, true);
        fresh.render(&mut term, &view, "t").unwrap();
        assert_eq!(reused, String::from_utf8(term.into_inner()).unwrap());
    }

    #[test]
    fn test_mode_line_counts_display_columns() {
        let mut view = EditorView::new("K:C\n你好A", 5);
        view.move_cursor_to(6);
        let out = render_plain(&view, false, 60);
        assert!(out.contains(" L2 C5 sel 6..6 "));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("你好世界", 5), "你好");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }
}
