//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{APP_DIR_NAME, CONFIG_DIR_ENV};
use crate::models::{BuilderConfig, Frame, Glass, PanelSize};
use crate::services::reconciler::ReconcilePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Builder configuration used for new sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Module size
    pub size: PanelSize,
    /// Variant name (unknown names resolve to the size's default layout)
    pub variant: String,
    /// Glass colour
    pub glass: Glass,
    /// Frame trim
    pub frame: Frame,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let builder = BuilderConfig::default();
        Self {
            size: builder.size,
            variant: builder.variant,
            glass: builder.glass,
            frame: builder.frame,
        }
    }
}

impl DefaultsConfig {
    /// Converts to the configuration a fresh session starts with.
    #[must_use]
    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig::new(self.size, self.variant.clone())
            .with_glass(self.glass)
            .with_frame(self.frame)
    }
}

/// Reset policy for configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Clear the panel when only the frame changes
    pub reset_on_frame_change: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            reset_on_frame_change: ReconcilePolicy::default().reset_on_frame_change,
        }
    }
}

impl ReconcileConfig {
    /// Policy handed to the reconciler.
    #[must_use]
    pub const fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            reset_on_frame_change: self.reset_on_frame_change,
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory exports are written to when no output file is given
    pub export_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Export directory, falling back to the working directory.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Application configuration.
///
/// Stored as `config.toml` in the platform config directory:
///
/// - Linux: `~/.config/Panelsmith/config.toml`
/// - macOS: `~/Library/Application Support/Panelsmith/config.toml`
/// - Windows: `%APPDATA%\Panelsmith\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Session defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Reconciliation policy
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    /// File system locations
    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the platform-specific config directory.
    ///
    /// `PANELSMITH_CONFIG_DIR` takes precedence when set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Returns the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file, or defaults if it doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path` via a temp file and atomic rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// # Errors
    ///
    /// Returns error if the default variant is blank or the export directory
    /// points at an existing file.
    pub fn validate(&self) -> Result<()> {
        if self.defaults.variant.trim().is_empty() {
            anyhow::bail!("Default variant must not be empty");
        }

        if let Some(dir) = &self.paths.export_dir {
            if dir.exists() && !dir.is_dir() {
                anyhow::bail!("Export path is not a directory: {}", dir.display());
            }
        }

        Ok(())
    }
}
