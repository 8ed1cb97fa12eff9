//! Editor view - an in-memory editor widget
//!
//! Holds the authoritative document, the selection and a viewport into
//! the document. Every change is queued as a `WidgetEvent` for whoever
//! drives the view.

use crate::document::Document;
use crate::sync::{EditorHandle, ScrollOptions, SelectionRange, WidgetEvent};

/// An editable view of a document
#[derive(Debug)]
pub struct EditorView {
    doc: Document,
    /// Selection anchor (char offset)
    anchor: usize,
    /// Selection head, where the cursor sits (char offset)
    head: usize,
    /// First visible line
    top_line: usize,
    /// Number of visible lines
    height: usize,
    editable: bool,
    focused: bool,
    alive: bool,
    /// Whether the document changed since creation
    modified: bool,
    /// Bumped on every text change
    revision: u64,
    events: Vec<WidgetEvent>,
}

impl EditorView {
    /// Create a view over `text` showing `height` lines
    pub fn new(text: impl Into<String>, height: usize) -> Self {
        Self {
            doc: Document::new(text),
            anchor: 0,
            head: 0,
            top_line: 0,
            height: height.max(1),
            editable: true,
            focused: false,
            alive: true,
            modified: false,
            revision: 0,
            events: Vec::new(),
        }
    }

    /// Get the document
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Get the cursor position (selection head)
    pub fn cursor(&self) -> usize {
        self.head
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Get the viewport height in lines
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set the viewport height
    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.top_line = self.top_line.min(self.max_top_line());
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Text revision, changes whenever the document does
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Check if a line is visible in the viewport
    pub fn is_line_visible(&self, line: usize) -> bool {
        line >= self.top_line && line < self.top_line + self.height
    }

    /// Ensure the cursor line is visible, adjusting top_line if needed
    pub fn ensure_cursor_visible(&mut self) {
        let (line, _) = self.doc.line_col(self.head);
        if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + self.height {
            self.top_line = line + 1 - self.height;
        }
    }

    /// Insert text at the cursor, replacing any selection.
    ///
    /// Returns false if the view does not accept edits.
    pub fn insert_str(&mut self, s: &str) -> bool {
        if !self.alive || !self.editable {
            return false;
        }
        let range = self.selection();
        if !self.doc.replace(range.from, range.to, s) {
            return false;
        }
        let caret = range.from + s.chars().count();
        self.after_edit(caret);
        true
    }

    /// Delete the selection, or the char before the cursor (backspace)
    pub fn delete_backward(&mut self) -> bool {
        if !self.alive || !self.editable {
            return false;
        }
        let range = self.selection();
        let (from, to) = if range.is_empty() {
            if range.from == 0 {
                return false;
            }
            (range.from - 1, range.from)
        } else {
            (range.from, range.to)
        };
        if !self.doc.replace(from, to, "") {
            return false;
        }
        self.after_edit(from);
        true
    }

    /// Move the cursor, collapsing the selection
    pub fn move_cursor_to(&mut self, offset: usize) {
        self.select(offset, offset);
    }

    /// Select from `anchor` to `head` as a user drag would
    pub fn select(&mut self, anchor: usize, head: usize) {
        if !self.alive {
            return;
        }
        let len = self.doc.len();
        self.apply_selection(anchor.min(len), head.min(len));
        self.ensure_cursor_visible();
    }

    fn after_edit(&mut self, caret: usize) {
        self.modified = true;
        self.revision += 1;
        self.events.push(WidgetEvent::ContentChanged(self.doc.text().to_string()));
        self.apply_selection(caret, caret);
        self.ensure_cursor_visible();
    }

    fn apply_selection(&mut self, anchor: usize, head: usize) {
        let before = self.selection();
        self.anchor = anchor;
        self.head = head;
        let after = self.selection();
        if after != before {
            self.events.push(WidgetEvent::SelectionChanged(after));
        }
    }

    fn max_top_line(&self) -> usize {
        self.doc.line_count().saturating_sub(self.height)
    }
}

impl EditorHandle for EditorView {
    fn is_alive(&self) -> bool {
        self.alive
    }

    fn text(&self) -> &str {
        self.doc.text()
    }

    fn len(&self) -> usize {
        self.doc.len()
    }

    fn selection(&self) -> SelectionRange {
        SelectionRange::new(self.anchor, self.head)
    }

    fn replace_all(&mut self, text: &str) {
        if !self.alive {
            return;
        }
        let old_len = self.doc.len();
        self.doc.replace(0, old_len, text);
        self.modified = true;
        self.revision += 1;
        self.events.push(WidgetEvent::ContentChanged(self.doc.text().to_string()));

        // The selection maps through the edit; it is not explicitly set.
        let len = self.doc.len();
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
        self.top_line = self.top_line.min(self.max_top_line());
    }

    fn set_selection(&mut self, range: SelectionRange) {
        if !self.alive {
            return;
        }
        let range = range.clamped(self.doc.len());
        self.apply_selection(range.from, range.to);
    }

    fn scroll_into_view(&mut self, range: SelectionRange, options: ScrollOptions) {
        if !self.alive {
            return;
        }
        let (line, _) = self.doc.line_col(range.from);
        let top = if options.centered {
            line.saturating_sub(self.height / 2)
        } else {
            let margin = options.margin.min(self.height.saturating_sub(1) / 2);
            if line < self.top_line + margin {
                line.saturating_sub(margin)
            } else if line + margin >= self.top_line + self.height {
                line + margin + 1 - self.height
            } else {
                self.top_line
            }
        };
        self.top_line = top.min(self.max_top_line());
    }

    fn focus(&mut self) {
        if self.alive {
            self.focused = true;
        }
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn destroy(&mut self) {
        self.alive = false;
        self.focused = false;
        self.events.clear();
    }

    fn drain_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }
}
