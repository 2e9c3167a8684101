// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use exif_lens::config::{self, Config, ZeroCoordinates};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.zero_coordinates = Some(ZeroCoordinates::Explicit);
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.zero_coordinates, Some(ZeroCoordinates::Explicit));
//! ```

pub mod defaults;

use crate::domain::metadata::PresencePolicy;
use crate::error::Result;
use crate::ui::report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ExifLens";

/// How zero-valued GPS latitude or longitude is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroCoordinates {
    /// Zero counts as "no location".
    #[default]
    Missing,
    /// Zero is a real coordinate.
    Explicit,
}

impl From<ZeroCoordinates> for PresencePolicy {
    fn from(value: ZeroCoordinates) -> Self {
        match value {
            ZeroCoordinates::Missing => PresencePolicy::Truthy,
            ZeroCoordinates::Explicit => PresencePolicy::Explicit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub color: Option<bool>,
    #[serde(default)]
    pub show_banner: Option<bool>,
    #[serde(default)]
    pub clear_screen: Option<bool>,
    #[serde(default)]
    pub output: Option<OutputFormat>,
    #[serde(default)]
    pub zero_coordinates: Option<ZeroCoordinates>,
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: Some(DEFAULT_COLOR),
            show_banner: Some(DEFAULT_SHOW_BANNER),
            clear_screen: Some(DEFAULT_CLEAR_SCREEN),
            output: Some(OutputFormat::default()),
            zero_coordinates: Some(ZeroCoordinates::default()),
            extensions: Some(default_extensions()),
        }
    }
}

impl Config {
    #[must_use]
    pub fn color(&self) -> bool {
        self.color.unwrap_or(DEFAULT_COLOR)
    }

    #[must_use]
    pub fn show_banner(&self) -> bool {
        self.show_banner.unwrap_or(DEFAULT_SHOW_BANNER)
    }

    #[must_use]
    pub fn clear_screen(&self) -> bool {
        self.clear_screen.unwrap_or(DEFAULT_CLEAR_SCREEN)
    }

    #[must_use]
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }

    #[must_use]
    pub fn presence_policy(&self) -> PresencePolicy {
        self.zero_coordinates.unwrap_or_default().into()
    }

    /// Interactive filter extensions, lowercased with leading dots removed.
    ///
    /// An empty list falls back to the defaults.
    #[must_use]
    pub fn extensions(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .extensions
            .iter()
            .flatten()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if configured.is_empty() {
            default_extensions()
        } else {
            configured
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect()
}

/// Location of `settings.toml` in the platform config directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
