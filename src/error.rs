//! Error types for abcedit

use thiserror::Error;

/// Result type alias for abcedit operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selection {from}..{to} for document of length {len}")]
    InvalidSelection { from: i64, to: i64, len: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
