//! # Configuration Module
//!
//! This module handles user configuration for SetFlow. Settings live in a
//! JSON file in the platform-standard configuration directory:
//! - Linux: `~/.config/setflow/config.json`
//! - macOS: `~/Library/Application Support/setflow/config.json`
//! - Windows: `%APPDATA%\setflow\config.json`
//!
//! The `SETFLOW_CONFIG` environment variable points at a different file.
//! A missing file is not an error; every setting has a default and command
//! line flags take precedence over the file.
//!
//! ```json
//! {
//!   "output_dir": "/home/dj/sets/optimized",
//!   "write_csv": true,
//!   "write_m3u": true,
//!   "show_analysis": true,
//!   "chart_width": 40
//! }
//! ```

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SETFLOW_CONFIG";

/// Returns the platform-appropriate configuration directory for SetFlow.
///
/// The directory is not created; SetFlow only ever reads from it.
///
/// # Errors
///
/// Returns an error if the system configuration directory cannot be
/// determined.
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system config directory. Please ensure your platform supports standard config directories."
        )
    })?;

    Ok(config_dir.join("setflow"))
}

/// Returns the config file path, honouring [`CONFIG_ENV`].
///
/// # Errors
///
/// Returns an error if no override is set and the platform config directory
/// cannot be determined.
pub fn get_config_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(get_config_dir()?.join("config.json")),
    }
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Where exports are written; next to the input file when unset.
    pub output_dir: Option<PathBuf>,
    /// Write `<name>_final.csv` after optimizing.
    pub write_csv: bool,
    /// Write `<name>_final.m3u8` after optimizing.
    pub write_m3u: bool,
    /// Print statistics and the energy-flow chart.
    pub show_analysis: bool,
    /// Bar width of the energy-flow chart.
    pub chart_width: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            write_csv: false,
            write_m3u: false,
            show_analysis: true,
            chart_width: 40,
        }
    }
}

impl RuntimeConfig {
    /// Load the configuration from its standard location.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load the configuration from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Create configuration with an explicit output directory
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if output_dir.is_some() {
            self.output_dir = output_dir;
        }
        self
    }
}
