//! abcedit - editor core for ABC music notation
//!
//! Provides the highlighting tokenizer for ABC text and the synchronizer
//! that keeps a host and an editor widget in agreement about content and
//! selection.

pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod sync;
pub mod syntax;
pub mod terminal;
pub mod view;

pub use config::Config;
pub use document::Document;
pub use error::{EditorError, Result};
pub use sync::{EditorHandle, EditorProps, HostListener, SelectionRange, SelectionRequest, Synchronizer};
pub use syntax::{AbcLexer, ScannerState, TokenTag};
pub use view::EditorView;
