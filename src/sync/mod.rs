//! Host/editor synchronization
//!
//! The synchronizer sits between a host (for example a rendered score) and
//! an editor widget reached through `EditorHandle`.

mod handle;
mod selection;
mod synchronizer;

pub use handle::{EditorHandle, ScrollOptions, WidgetEvent};
pub use selection::{SelectionRange, SelectionRequest};
pub use synchronizer::{EditorProps, HostListener, SyncOptions, SyncState, Synchronizer};
