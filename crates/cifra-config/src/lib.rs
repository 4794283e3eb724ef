//! Configuration management for Cifra.
//!
//! Parses `cifra.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Loading never fails: missing keys take their defaults, and a corrupt
//! or unreadable file falls back to the default configuration with a
//! warning. The settings surface ([`Config::set`]) validates each edit
//! and the full record is persisted with [`Config::save`] after every
//! change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "cifra.toml";

/// Inclusive font size bounds in pixels.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 10..=30;

/// Application configuration.
///
/// Marker strings are stored as literals and may contain characters with
/// special meaning in regex syntax; the highlighter escapes them before
/// compiling a matcher. An empty `open_marker` is accepted as a degenerate
/// configuration: every bare chord-shaped substring then highlights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Opening chord marker.
    pub open_marker: String,
    /// Closing chord marker. When unset, derived from `open_marker`
    /// (see [`Config::close_marker`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_marker: Option<String>,
    /// Chord span text color (any CSS color expression).
    pub highlight_color: String,
    /// Render chord spans in bold.
    pub bold: bool,
    /// Chord span font size in pixels, bounded [10, 30].
    pub font_size: u32,
    /// Fenced-block language tag handled by the tablature renderer.
    pub tab_language: String,

    /// Path the configuration was loaded from (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_marker: "[[".to_owned(),
            close_marker: None,
            highlight_color: "red".to_owned(),
            bold: true,
            font_size: 16,
            tab_language: "tablatura".to_owned(),
            config_path: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Unknown settings key.
    #[error("Unknown setting: {0}")]
    UnknownKey(String),
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `cifra.toml` in the current directory and parents.
    /// Falls back to defaults when no file is found or the file cannot
    /// be read or parsed; loading never fails.
    #[must_use]
    pub fn load(config_path: Option<&Path>) -> Self {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(Self::discover_config);

        let Some(path) = path else {
            return Self::default();
        };

        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "cannot read config file, using defaults");
                Self::default()
            }
        };

        config.clamp_font_size();
        config.config_path = Some(path);
        config
    }

    /// Save the full configuration record to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Effective closing marker.
    ///
    /// The explicit `close_marker` when set, otherwise derived from
    /// `open_marker` by reversing its characters and mirroring paired
    /// delimiters, so `[[` closes with `]]` and `<{` with `}>`. Derived
    /// at call time so a marker edit can never observe a stale value.
    #[must_use]
    pub fn close_marker(&self) -> String {
        self.close_marker.clone().unwrap_or_else(|| {
            self.open_marker
                .chars()
                .rev()
                .map(mirror_delimiter)
                .collect()
        })
    }

    /// Apply a settings-surface edit by key name.
    ///
    /// Keys match the TOML field names. Values are validated before the
    /// field is mutated; on error the configuration is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for an unrecognized key and
    /// [`ConfigError::Validation`] for an invalid value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "open_marker" => self.open_marker = value.to_owned(),
            "close_marker" => {
                self.close_marker = if value.is_empty() {
                    None
                } else {
                    Some(value.to_owned())
                };
            }
            "highlight_color" => self.highlight_color = value.to_owned(),
            "bold" => {
                self.bold = value.parse().map_err(|_| {
                    ConfigError::Validation(format!("bold must be true or false, got '{value}'"))
                })?;
            }
            "font_size" => {
                let size: u32 = value.parse().map_err(|_| {
                    ConfigError::Validation(format!("font_size must be an integer, got '{value}'"))
                })?;
                if !FONT_SIZE_RANGE.contains(&size) {
                    return Err(ConfigError::Validation(format!(
                        "font_size must be in [{}, {}], got {size}",
                        FONT_SIZE_RANGE.start(),
                        FONT_SIZE_RANGE.end()
                    )));
                }
                self.font_size = size;
            }
            "tab_language" => self.tab_language = value.to_owned(),
            _ => return Err(ConfigError::UnknownKey(key.to_owned())),
        }
        Ok(())
    }

    /// Force a loaded font size into bounds.
    ///
    /// Loading must never fail, so out-of-range persisted values are
    /// clamped rather than rejected.
    fn clamp_font_size(&mut self) {
        let clamped = self
            .font_size
            .clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end());
        if clamped != self.font_size {
            tracing::warn!(
                font_size = self.font_size,
                clamped,
                "font_size out of bounds, clamping"
            );
            self.font_size = clamped;
        }
    }

    /// Search for a config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }
}

/// Mirror a paired delimiter character; other characters pass through.
fn mirror_delimiter(c: char) -> char {
    match c {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        _ => c,
    }
}
