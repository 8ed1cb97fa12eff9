//! The capability interface the synchronizer drives
//!
//! Any editor widget can sit behind `EditorHandle`. Widgets report their own
//! changes by queuing `WidgetEvent`s, which the synchronizer drains
//! synchronously after every call it makes.

use super::selection::SelectionRange;

/// A change notification emitted by the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The buffer changed; carries the full new text
    ContentChanged(String),
    /// The selection was set (by the user or programmatically)
    SelectionChanged(SelectionRange),
}

/// How to scroll a range into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    /// Put the range in the vertical middle of the viewport
    pub centered: bool,
    /// Lines kept visible around the range when not centering
    pub margin: usize,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            centered: true,
            margin: 5,
        }
    }
}

/// Minimal editor widget capability
pub trait EditorHandle {
    /// False once the widget has been torn down
    fn is_alive(&self) -> bool;

    /// Current buffer text
    fn text(&self) -> &str;

    /// Buffer length in chars
    fn len(&self) -> usize;

    /// Check if the buffer is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current selection
    fn selection(&self) -> SelectionRange;

    /// Replace the whole buffer in one edit spanning its previous length
    fn replace_all(&mut self, text: &str);

    /// Set the selection. Queues `SelectionChanged` if it actually changed.
    fn set_selection(&mut self, range: SelectionRange);

    fn scroll_into_view(&mut self, range: SelectionRange, options: ScrollOptions);

    fn focus(&mut self);

    /// Allow or refuse user edits
    fn set_editable(&mut self, editable: bool);

    /// Tear the widget down. Must be idempotent.
    fn destroy(&mut self);

    /// Take every queued notification, oldest first
    fn drain_events(&mut self) -> Vec<WidgetEvent>;
}
