//! Content and selection synchronization between a host and an editor
//!
//! Three sources change the editor: the user, host content updates and
//! host selection requests. A selection applied for the host makes the
//! widget report a selection change of its own; that one notification is
//! swallowed so the host never sees its own request echoed back.

use std::time::{Duration, Instant};

use log::{debug, warn};

use super::handle::{EditorHandle, ScrollOptions, WidgetEvent};
use super::selection::{SelectionRange, SelectionRequest};
use crate::error::Result;

/// Receives notifications for the host
pub trait HostListener {
    /// The text changed; carries the full new text
    fn on_change(&mut self, text: &str);

    /// The selection changed for a reason other than a host request
    fn on_selection_change(&mut self, _from: usize, _to: usize) {}
}

/// Host-supplied inputs, reapplied on every host update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorProps {
    pub value: String,
    pub selected_range: Option<SelectionRequest>,
    pub disabled: bool,
}

/// Synchronizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    /// A host selection is being applied; its echo will be suppressed
    ApplyingExternalSelection,
}

/// Tunables for applying host selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Margin passed to scroll-into-view
    pub scroll_margin: usize,
    /// Delay before the deferred focus request
    pub focus_delay: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            scroll_margin: 5,
            focus_delay: Duration::from_millis(10),
        }
    }
}

/// Keeps an editor widget and its host consistent
pub struct Synchronizer<H: EditorHandle, L: HostListener> {
    handle: H,
    host: L,
    state: SyncState,
    options: SyncOptions,
    /// Deadline of the deferred focus request
    pending_focus: Option<Instant>,
    /// Last selection request seen by `reconcile`
    last_request: Option<SelectionRequest>,
}

impl<H: EditorHandle, L: HostListener> Synchronizer<H, L> {
    pub fn new(handle: H, host: L, options: SyncOptions) -> Self {
        Self {
            handle,
            host,
            state: SyncState::Idle,
            options,
            pending_focus: None,
            last_request: None,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Mutable access for user-driven widget operations.
    ///
    /// Call `process_events` afterwards to forward the resulting changes.
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub fn host(&self) -> &L {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut L {
        &mut self.host
    }

    /// Whether a deferred focus request is waiting
    pub fn has_pending_focus(&self) -> bool {
        self.pending_focus.is_some()
    }

    /// The widget's content changed from user input
    pub fn on_user_edit(&mut self, text: &str) {
        self.host.on_change(text);
    }

    /// The widget's selection changed
    pub fn on_user_selection_change(&mut self, range: SelectionRange) {
        match self.state {
            SyncState::ApplyingExternalSelection => {
                debug!("Suppressed echo of host selection {}..{}", range.from, range.to);
                self.state = SyncState::Idle;
            }
            SyncState::Idle => self.host.on_selection_change(range.from, range.to),
        }
    }

    /// Drain the widget's queued notifications and dispatch them
    pub fn process_events(&mut self) {
        for event in self.handle.drain_events() {
            match event {
                WidgetEvent::ContentChanged(text) => self.on_user_edit(&text),
                WidgetEvent::SelectionChanged(range) => self.on_user_selection_change(range),
            }
        }
    }

    /// Replace the widget's content with host text, unless it already matches
    pub fn set_external_content(&mut self, text: &str) {
        if !self.handle.is_alive() || self.handle.text() == text {
            return;
        }
        self.handle.replace_all(text);
        self.process_events();
    }

    /// Apply a selection requested by the host.
    ///
    /// Invalid requests are logged and rejected without touching the widget.
    pub fn set_external_selection(&mut self, from: i64, to: i64) -> Result<()> {
        if !self.handle.is_alive() {
            return Ok(());
        }

        let range = match SelectionRange::checked(from, to, self.handle.len()) {
            Ok(range) => range,
            Err(err) => {
                warn!("Rejected selection request: {}", err);
                return Err(err);
            }
        };

        // Anything the user did before this request is reported first.
        self.process_events();

        self.state = SyncState::ApplyingExternalSelection;
        self.handle.set_selection(range);
        self.handle.scroll_into_view(
            range,
            ScrollOptions {
                centered: true,
                margin: self.options.scroll_margin,
            },
        );
        self.process_events();
        // No echo arrives when the selection was already in place.
        self.state = SyncState::Idle;

        self.pending_focus = Some(Instant::now() + self.options.focus_delay);
        Ok(())
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if self.handle.is_alive() {
            self.handle.set_editable(!disabled);
        }
    }

    /// Apply a full set of host props.
    ///
    /// A selection request is applied only when it differs from the last
    /// one seen, so rerenders with the same props do not move the cursor.
    pub fn reconcile(&mut self, props: &EditorProps) {
        self.set_external_content(&props.value);
        self.set_disabled(props.disabled);

        if props.selected_range != self.last_request {
            self.last_request = props.selected_range;
            if let Some(request) = props.selected_range {
                // Already logged; a rejected request is not retried.
                let _ = self.set_external_selection(request.from, request.to);
            }
        }
    }

    /// Fire the deferred focus once its deadline has passed.
    ///
    /// Returns true if focus was requested on the widget.
    pub fn poll_deferred(&mut self, now: Instant) -> bool {
        match self.pending_focus {
            Some(deadline) if now >= deadline => {
                self.pending_focus = None;
                if self.handle.is_alive() {
                    debug!("Deferred focus fired");
                    self.handle.focus();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Tear down the widget and cancel pending work. Idempotent.
    pub fn destroy(&mut self) {
        self.pending_focus = None;
        self.state = SyncState::Idle;
        if self.handle.is_alive() {
            self.handle.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call and echoes selection changes like a real widget
    #[derive(Default)]
    struct FakeHandle {
        text: String,
        selection: SelectionRange,
        events: Vec<WidgetEvent>,
        alive: bool,
        editable: bool,
        focus_calls: usize,
        destroy_calls: usize,
        scrolls: Vec<(SelectionRange, ScrollOptions)>,
    }

    impl FakeHandle {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                alive: true,
                editable: true,
                ..Default::default()
            }
        }
    }

    impl EditorHandle for FakeHandle {
        fn is_alive(&self) -> bool {
            self.alive
        }
        fn text(&self) -> &str {
            &self.text
        }
        fn len(&self) -> usize {
            self.text.chars().count()
        }
        fn selection(&self) -> SelectionRange {
            self.selection
        }
        fn replace_all(&mut self, text: &str) {
            self.text = text.to_string();
            self.events.push(WidgetEvent::ContentChanged(text.to_string()));
        }
        fn set_selection(&mut self, range: SelectionRange) {
            if range != self.selection {
                self.selection = range;
                self.events.push(WidgetEvent::SelectionChanged(range));
            }
        }
        fn scroll_into_view(&mut self, range: SelectionRange, options: ScrollOptions) {
            self.scrolls.push((range, options));
        }
        fn focus(&mut self) {
            self.focus_calls += 1;
        }
        fn set_editable(&mut self, editable: bool) {
            self.editable = editable;
        }
        fn destroy(&mut self) {
            self.alive = false;
            self.destroy_calls += 1;
        }
        fn drain_events(&mut self) -> Vec<WidgetEvent> {
            std::mem::take(&mut self.events)
        }
    }

    #[derive(Default)]
    struct Host {
        changes: Vec<String>,
        selections: Vec<(usize, usize)>,
    }

    impl HostListener for Host {
        fn on_change(&mut self, text: &str) {
            self.changes.push(text.to_string());
        }
        fn on_selection_change(&mut self, from: usize, to: usize) {
            self.selections.push((from, to));
        }
    }

    fn sync(text: &str) -> Synchronizer<FakeHandle, Host> {
        Synchronizer::new(FakeHandle::new(text), Host::default(), SyncOptions::default())
    }

    #[test]
    fn test_external_selection_is_not_echoed() {
        let mut s = sync("0123456789");
        s.set_external_selection(2, 5).unwrap();

        assert_eq!(s.handle().selection(), SelectionRange { from: 2, to: 5 });
        assert!(s.host().selections.is_empty());
        assert_eq!(s.state(), SyncState::Idle);
        assert_eq!(s.handle().scrolls.len(), 1);
        assert!(s.handle().scrolls[0].1.centered);
        assert!(s.has_pending_focus());
    }

    #[test]
    fn test_only_one_notification_suppressed() {
        let mut s = sync("0123456789");
        s.set_external_selection(2, 5).unwrap();

        // The next user selection goes through.
        s.handle_mut().set_selection(SelectionRange::caret(7));
        s.process_events();
        assert_eq!(s.host().selections, vec![(7, 7)]);
    }

    #[test]
    fn test_unchanged_selection_leaves_state_idle() {
        let mut s = sync("0123456789");
        s.set_external_selection(0, 0).unwrap();
        assert_eq!(s.state(), SyncState::Idle);

        s.handle_mut().set_selection(SelectionRange::caret(3));
        s.process_events();
        assert_eq!(s.host().selections, vec![(3, 3)]);
    }

    #[test]
    fn test_pending_user_event_reported_before_request() {
        let mut s = sync("0123456789");
        s.handle_mut().set_selection(SelectionRange::caret(9));
        s.set_external_selection(1, 2).unwrap();
        assert_eq!(s.host().selections, vec![(9, 9)]);
    }

    #[test]
    fn test_invalid_selection_rejected() {
        let mut s = sync("0123456789");
        assert!(s.set_external_selection(5, 2).is_err());
        assert!(s.set_external_selection(-1, 3).is_err());
        assert!(s.set_external_selection(0, 11).is_err());

        assert_eq!(s.handle().selection(), SelectionRange::caret(0));
        assert!(s.handle().scrolls.is_empty());
        assert!(!s.has_pending_focus());
        assert_eq!(s.state(), SyncState::Idle);
    }

    #[test]
    fn test_external_content_same_text_is_noop() {
        let mut s = sync("ABC");
        s.set_external_content("ABC");
        assert!(s.host().changes.is_empty());
        assert!(s.handle().events.is_empty());

        s.set_external_content("ABCD");
        assert_eq!(s.handle().text(), "ABCD");
        assert_eq!(s.host().changes, vec!["ABCD".to_string()]);
    }

    #[test]
    fn test_user_edit_forwarded() {
        let mut s = sync("");
        s.on_user_edit("X:1");
        assert_eq!(s.host().changes, vec!["X:1".to_string()]);
    }

    #[test]
    fn test_set_disabled() {
        let mut s = sync("ABC");
        s.set_disabled(true);
        assert!(!s.handle().editable);
        s.set_disabled(false);
        assert!(s.handle().editable);
    }

    #[test]
    fn test_deferred_focus() {
        let mut s = sync("ABC");
        s.set_external_selection(1, 2).unwrap();

        let later = Instant::now() + Duration::from_secs(1);
        assert!(s.poll_deferred(later));
        assert_eq!(s.handle().focus_calls, 1);
        assert!(!s.poll_deferred(later));
    }

    #[test]
    fn test_destroy_twice_cancels_focus() {
        let mut s = sync("ABC");
        s.set_external_selection(1, 2).unwrap();
        s.destroy();
        s.destroy();

        assert_eq!(s.handle().destroy_calls, 1);
        assert!(!s.has_pending_focus());
        assert!(!s.poll_deferred(Instant::now() + Duration::from_secs(1)));
        assert_eq!(s.handle().focus_calls, 0);
    }

    #[test]
    fn test_operations_after_destroy_are_noops() {
        let mut s = sync("ABC");
        s.destroy();
        s.set_external_content("other");
        assert!(s.set_external_selection(5, 2).is_ok());
        assert_eq!(s.handle().text(), "ABC");
        assert!(!s.has_pending_focus());
    }

    #[test]
    fn test_reconcile_applies_selection_once() {
        let mut s = sync("ABCDEF");
        let props = EditorProps {
            value: "ABCDEF".to_string(),
            selected_range: Some(SelectionRequest::new(1, 3)),
            disabled: true,
        };
        s.reconcile(&props);
        assert_eq!(s.handle().selection(), SelectionRange::new(1, 3));
        assert!(!s.handle().editable);

        // User moves the cursor, then the host rerenders with the same props.
        s.handle_mut().set_selection(SelectionRange::caret(5));
        s.process_events();
        s.reconcile(&props);
        assert_eq!(s.handle().selection(), SelectionRange::caret(5));
        assert_eq!(s.handle().scrolls.len(), 1);
        assert_eq!(s.host().selections, vec![(5, 5)]);
    }
}
