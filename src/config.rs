//! Configuration file support
//!
//! Loads settings from ~/.abcedit.toml (or %USERPROFILE%\.abcedit.toml on Windows)
//!
//! Example:
//! ```text
//! [editor]
//! scroll-margin = 5
//! focus-delay-ms = 10
//! line-numbers = true
//! highlight = true
//! height = 24
//!
//! [theme]
//! Header = "bright-blue bold"
//! Chord = "yellow italic"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use toml::{Table, Value};

use crate::error::{EditorError, Result};
use crate::sync::SyncOptions;
use crate::syntax::{Style, Theme, TokenTag};

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Lines kept visible around a scrolled-to selection
    pub scroll_margin: usize,
    /// Delay before focusing the editor after a host selection
    pub focus_delay: Duration,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Whether syntax highlighting is enabled
    pub highlight: bool,
    /// Viewport height in lines
    pub height: usize,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scroll_margin: 5,
            focus_delay: Duration::from_millis(10),
            show_line_numbers: false,
            highlight: true,
            height: 24,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".abcedit.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".abcedit.toml"))
        }
    }

    /// Load configuration from the default path.
    ///
    /// A missing file gives the defaults; an unreadable or malformed one is
    /// logged and also gives the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_path(&path).unwrap_or_else(|err| {
                warn!("Ignoring config file {}: {}", path.display(), err);
                Config::default()
            }),
            _ => Config::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();

        if let Some(editor) = table.get("editor") {
            let editor = editor
                .as_table()
                .ok_or_else(|| EditorError::Config("[editor] must be a table".to_string()))?;
            config.apply_editor(editor);
        }

        if let Some(theme) = table.get("theme") {
            let theme = theme
                .as_table()
                .ok_or_else(|| EditorError::Config("[theme] must be a table".to_string()))?;
            config.apply_theme(theme);
        }

        Ok(config)
    }

    /// Apply settings from the [editor] table
    fn apply_editor(&mut self, settings: &Table) {
        if let Some(n) = get_int(settings, "scroll-margin") {
            self.scroll_margin = n.clamp(0, 50) as usize;
        }

        if let Some(n) = get_int(settings, "focus-delay-ms") {
            self.focus_delay = Duration::from_millis(n.clamp(0, 1000) as u64);
        }

        if let Some(value) = get_bool(settings, "line-numbers") {
            self.show_line_numbers = value;
        }

        if let Some(value) = get_bool(settings, "highlight") {
            self.highlight = value;
        }

        if let Some(n) = get_int(settings, "height") {
            self.height = n.clamp(1, 500) as usize;
        }
    }

    /// Apply style overrides from the [theme] table
    fn apply_theme(&mut self, settings: &Table) {
        for (key, value) in settings {
            let Some(desc) = value.as_str() else {
                warn!("Theme entry {} is not a string", key);
                continue;
            };
            let Some(style) = Style::parse(desc) else {
                warn!("Unknown style for {}: {}", key, desc);
                continue;
            };
            if key.eq_ignore_ascii_case("selection") {
                self.theme.selection = style;
            } else if let Some(tag) = TokenTag::from_name(key) {
                self.theme.set_style(tag, style);
            } else {
                warn!("Unknown theme key: {}", key);
            }
        }
    }

    /// Synchronizer options derived from these settings
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            scroll_margin: self.scroll_margin,
            focus_delay: self.focus_delay,
        }
    }
}

fn get_int(settings: &Table, key: &str) -> Option<i64> {
    match settings.get(key)? {
        Value::Integer(n) => Some(*n),
        other => {
            warn!("Config value {} should be an integer, got {}", key, other);
            None
        }
    }
}

fn get_bool(settings: &Table, key: &str) -> Option<bool> {
    match settings.get(key)? {
        Value::Boolean(b) => Some(*b),
        other => {
            warn!("Config value {} should be a boolean, got {}", key, other);
            None
        }
    }
}
