//! Shared CLI plumbing: exit codes, error type and output helpers.

use crate::catalog::IconCatalog;
use crate::config::Config;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Invalid input or user error
    Validation = 1,
    /// File system or serialization failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Invalid input or user error (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type of command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the embedded icon catalog.
pub fn load_catalog() -> CliResult<Arc<IconCatalog>> {
    IconCatalog::load()
        .map(Arc::new)
        .map_err(|e| CliError::io(format!("Failed to load icon catalog: {e:#}")))
}

/// Loads the configuration, falling back to defaults when it is unreadable.
pub fn load_config() -> Config {
    Config::load().unwrap_or_else(|e| {
        tracing::warn!("Using default configuration: {e:#}");
        Config::default()
    })
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON output: {e}")))?;
    println!("{json}");
    Ok(())
}
