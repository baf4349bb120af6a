//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and version information.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Panelsmith";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "panelsmith";

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "Panelsmith";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "PANELSMITH_CONFIG_DIR";
