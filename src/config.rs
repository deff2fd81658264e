//! Configuration and color scheme management for devcli-term.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.devcli-term/config.toml`
//! - Built-in color schemes for the emulator palette
//!
//! # Configuration File
//!
//! ```toml
//! # Color scheme: default, monokai, nord, dracula
//! color_scheme = "dracula"
//!
//! # Log filter written to ~/.devcli-term/devcli-term.log (RUST_LOG overrides)
//! log_level = "info"
//!
//! # Show the greeting while the scrollback is empty
//! banner = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::ansi::ColorTag;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config: {0}")]
    Write(#[source] std::io::Error),

    #[error("Could not determine config path")]
    NoHome,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color scheme name
    pub color_scheme: String,
    /// Tracing filter for the log file
    pub log_level: String,
    /// Show the welcome banner over an empty scrollback
    pub banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_scheme: "default".to_string(),
            log_level: "info".to_string(),
            banner: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to the default location, returning the file written
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let dir = Self::config_dir().ok_or(ConfigError::NoHome)?;
        let path = dir.join("config.toml");
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(ConfigError::Write)
    }

    /// `~/.devcli-term`, also home of the log file
    pub fn config_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".devcli-term"))
    }

    /// Get the color scheme
    pub fn get_color_scheme(&self) -> ColorScheme {
        ColorScheme::by_name(&self.color_scheme)
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub name: String,

    /// Untagged text
    pub text: Color,
    pub blue: Color,
    pub dim: Color,
    pub green: Color,
    pub red: Color,
    pub yellow: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_scheme()
    }
}

impl ColorScheme {
    /// Default color scheme
    pub fn default_scheme() -> Self {
        Self {
            name: "default".to_string(),
            text: Color::new(201, 209, 217),
            blue: Color::new(88, 166, 255),
            dim: Color::new(110, 118, 129),
            green: Color::new(63, 185, 80),
            red: Color::new(248, 81, 73),
            yellow: Color::new(210, 153, 34),
        }
    }

    /// Monokai scheme
    pub fn monokai() -> Self {
        Self {
            name: "monokai".to_string(),
            text: Color::new(248, 248, 242),
            blue: Color::new(102, 217, 239),
            dim: Color::new(117, 113, 94),
            green: Color::new(166, 226, 46),
            red: Color::new(249, 38, 114),
            yellow: Color::new(230, 219, 116),
        }
    }

    /// Nord scheme
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            text: Color::new(216, 222, 233),
            blue: Color::new(129, 161, 193),
            dim: Color::new(76, 86, 106),
            green: Color::new(163, 190, 140),
            red: Color::new(191, 97, 106),
            yellow: Color::new(235, 203, 139),
        }
    }

    /// Dracula scheme
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            text: Color::new(248, 248, 242),
            blue: Color::new(189, 147, 249),
            dim: Color::new(98, 114, 164),
            green: Color::new(80, 250, 123),
            red: Color::new(255, 85, 85),
            yellow: Color::new(241, 250, 140),
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "monokai" => Self::monokai(),
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            _ => Self::default_scheme(),
        }
    }

    /// List available schemes
    pub fn list() -> Vec<&'static str> {
        vec!["default", "monokai", "nord", "dracula"]
    }

    /// Color for a decoded span
    pub fn color_for(&self, tag: Option<ColorTag>) -> Color {
        match tag {
            None => self.text,
            Some(ColorTag::Blue) => self.blue,
            Some(ColorTag::Dim) => self.dim,
            Some(ColorTag::Green) => self.green,
            Some(ColorTag::Red) => self.red,
            Some(ColorTag::Yellow) => self.yellow,
        }
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
