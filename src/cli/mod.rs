//! CLI command handlers for Panelsmith.
//!
//! This module provides headless, scriptable access to the panel engine
//! for automation, testing, and CI integration.

pub mod common;
pub mod config;
pub mod export;
pub mod icons;
pub mod layouts;
pub mod replay;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use icons::IconsArgs;
pub use layouts::LayoutsArgs;
pub use replay::ReplayArgs;
