//! Configuration module for scopegen
//!
//! Scope generation defaults can be kept in a TOML (or JSON) file so they do
//! not have to be repeated on every invocation. Command line flags override
//! whatever the file says.
//!
//! # Config Location
//!
//! When no explicit path is given, the configuration is read from the
//! platform-appropriate config directory:
//! - **Linux**: `~/.config/scopegen/scope.toml`
//! - **macOS**: `~/Library/Application Support/scopegen/scope.toml`
//! - **Windows**: `%APPDATA%\scopegen\scope.toml`
//!
//! # Example
//!
//! ```toml
//! [layout]
//! max_rows = 8
//! width = 1600
//! height = 1200
//!
//! [smoothing]
//! enabled = true
//! window = 50
//!
//! [discover]
//! include_raw = false
//! include_off = true
//! ```

use crate::discover::DiscoverOptions;
use crate::error::{Result, ScopeError};
use crate::scope::{
    ScopeOptions, Smoothing, DEFAULT_HEIGHT, DEFAULT_MAX_ROWS, DEFAULT_SMOOTH_WINDOW,
    DEFAULT_WIDTH,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "scopegen";

/// Config filename
pub const CONFIG_FILE: &str = "scope.toml";

// ==================== Config Directory ====================

/// Get the application config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== Scope Config ====================

/// Persistent scope generation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Grid and window geometry
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Pane smoothing
    #[serde(default)]
    pub smoothing: SmoothingConfig,

    /// Signal discovery filters
    #[serde(default)]
    pub discover: DiscoverOptions,
}

/// Grid and window geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Maximum rows in a column
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,

    /// Window width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Window height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Pane smoothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Wrap every y expression in a moving-window average
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Window size in samples
    #[serde(default = "default_smooth_window")]
    pub window: u32,
}

fn default_true() -> bool {
    true
}

fn default_smooth_window() -> u32 {
    DEFAULT_SMOOTH_WINDOW
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window: DEFAULT_SMOOTH_WINDOW,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

impl ScopeConfig {
    /// Load a config file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScopeError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                ScopeError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })
        } else {
            toml::from_str(&content).map_err(|e| {
                ScopeError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })
        }
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from `path` (or the default location), returning defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let loaded = match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        };
        loaded.unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save the config; `.json` files are written as JSON, anything else as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScopeError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = if is_json(path) {
            serde_json::to_string_pretty(self)
                .map_err(|e| ScopeError::Config(format!("Failed to serialize config: {}", e)))?
        } else {
            toml::to_string_pretty(self)
                .map_err(|e| ScopeError::Config(format!("Failed to serialize config: {}", e)))?
        };

        std::fs::write(path, content).map_err(|e| {
            ScopeError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    /// Presentation options for the scope writer
    pub fn scope_options(&self) -> ScopeOptions {
        ScopeOptions {
            max_rows: self.layout.max_rows,
            width: self.layout.width,
            height: self.layout.height,
            smoothing: Smoothing {
                enabled: self.smoothing.enabled,
                window: self.smoothing.window,
            },
        }
    }

    /// Filters for signal discovery
    pub fn discover_options(&self) -> DiscoverOptions {
        self.discover
    }
}
