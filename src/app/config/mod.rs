// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[gps]` - Tag validation mode and rational precision
//! - `[library]` - Photo extensions and position cache size
//! - `[preview]` - Preview dimensions
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `GEOTAGGER_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use geotagger::app::config;
//!
//! let (config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//! let codec = config.codec();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::media::gps_codec::{CoordinateCodec, ValidationMode};
use crate::media::preview::PreviewSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// GPS tag handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GpsConfig {
    /// How invalid hemisphere references and out-of-range values are treated.
    #[serde(default = "default_validation", skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationMode>,

    /// Largest denominator used when encoding seconds.
    #[serde(
        default = "default_max_denominator",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_denominator: Option<u32>,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            validation: default_validation(),
            max_denominator: default_max_denominator(),
        }
    }
}

/// Photo library settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Extensions of the files listed as photos.
    #[serde(default = "default_extensions", skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Number of file positions kept in memory.
    #[serde(
        default = "default_position_cache_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub position_cache_capacity: Option<usize>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            position_cache_capacity: default_position_cache_capacity(),
        }
    }
}

/// Preview settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_width", skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(
        default = "default_preview_height",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<u32>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: default_preview_width(),
            height: default_preview_height(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub gps: GpsConfig,

    #[serde(default)]
    pub library: LibraryConfig,

    #[serde(default)]
    pub preview: PreviewConfig,
}

impl Config {
    /// Returns the validation mode, defaulting to strict.
    #[must_use]
    pub fn validation(&self) -> ValidationMode {
        self.gps.validation.unwrap_or_default()
    }

    /// Returns the denominator bound, never below [`MIN_MAX_DENOMINATOR`].
    #[must_use]
    pub fn max_denominator(&self) -> u32 {
        self.gps
            .max_denominator
            .unwrap_or(DEFAULT_MAX_DENOMINATOR)
            .max(MIN_MAX_DENOMINATOR)
    }

    /// Builds the coordinate codec described by the `[gps]` section.
    #[must_use]
    pub fn codec(&self) -> CoordinateCodec {
        CoordinateCodec::new(self.validation(), self.max_denominator())
    }

    /// Returns the photo extensions, lowercased, without leading dots.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .library
            .extensions
            .iter()
            .flatten()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if configured.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
        } else {
            configured
        }
    }

    #[must_use]
    pub fn position_cache_capacity(&self) -> usize {
        self.library
            .position_cache_capacity
            .unwrap_or(DEFAULT_POSITION_CACHE_CAPACITY)
            .clamp(MIN_POSITION_CACHE_CAPACITY, MAX_POSITION_CACHE_CAPACITY)
    }

    #[must_use]
    pub fn preview_size(&self) -> PreviewSize {
        PreviewSize::new(
            self.preview
                .width
                .unwrap_or(DEFAULT_PREVIEW_WIDTH)
                .min(MAX_PREVIEW_EDGE),
            self.preview
                .height
                .unwrap_or(DEFAULT_PREVIEW_HEIGHT)
                .min(MAX_PREVIEW_EDGE),
        )
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_validation() -> Option<ValidationMode> {
    Some(ValidationMode::default())
}

fn default_max_denominator() -> Option<u32> {
    Some(DEFAULT_MAX_DENOMINATOR)
}

fn default_extensions() -> Option<Vec<String>> {
    Some(DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect())
}

fn default_position_cache_capacity() -> Option<usize> {
    Some(DEFAULT_POSITION_CACHE_CAPACITY)
}

fn default_preview_width() -> Option<u32> {
    Some(DEFAULT_PREVIEW_WIDTH)
}

fn default_preview_height() -> Option<u32> {
    Some(DEFAULT_PREVIEW_HEIGHT)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). A missing file is not an
/// error. If the file exists but cannot be read, the default config is
/// returned with a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(e) => {
                    return (
                        Config::default(),
                        Some(format!(
                            "Ignoring {}: {e}. Using default settings.",
                            path.display()
                        )),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================
