//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::cli::layouts::parse_size;
use crate::config::Config;
use crate::models::{Frame, Glass};
use crate::services::resolver::preferred_variant;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Default panel size (2, 4, 6 or 8); resets the variant unless --variant is given
    #[arg(long, value_name = "SIZE")]
    size: Option<String>,

    /// Default variant
    #[arg(long, value_name = "NAME")]
    variant: Option<String>,

    /// Default glass colour (black or white)
    #[arg(long, value_name = "COLOUR")]
    glass: Option<String>,

    /// Default frame (black, gold, silver or white)
    #[arg(long, value_name = "FRAME")]
    frame: Option<String>,

    /// Whether a frame change clears the panel
    #[arg(long, value_name = "BOOL")]
    reset_on_frame_change: Option<bool>,

    /// Directory exports are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&config)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.variant.is_none()
            && self.glass.is_none()
            && self.frame.is_none()
            && self.reset_on_frame_change.is_none()
            && self.export_dir.is_none()
    }

    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.is_empty() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --size, --variant, --glass, --frame, --reset-on-frame-change, or --export-dir",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(size) = &self.size {
            let size = parse_size(size)?;
            config.defaults.size = size;
            config.defaults.variant = preferred_variant(size).to_string();
        }

        if let Some(variant) = &self.variant {
            if variant.trim().is_empty() {
                return Err(CliError::validation("Variant must not be empty"));
            }
            config.defaults.variant.clone_from(variant);
        }

        if let Some(glass) = &self.glass {
            config.defaults.glass = parse_choice(glass, &Glass::ALL, Glass::name, "glass")?;
        }

        if let Some(frame) = &self.frame {
            config.defaults.frame = parse_choice(frame, &Frame::ALL, Frame::name, "frame")?;
        }

        if let Some(reset) = self.reset_on_frame_change {
            config.reconcile.reset_on_frame_change = reset;
        }

        if let Some(path) = &self.export_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create export directory {}: {e}",
                    path.display()
                ))
            })?;
            config.paths.export_dir = Some(path.clone());
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Strict, case-insensitive match against a closed set of names.
fn parse_choice<T: Copy>(
    value: &str,
    all: &[T],
    name: fn(T) -> &'static str,
    what: &str,
) -> CliResult<T> {
    all.iter()
        .copied()
        .find(|item| name(*item).eq_ignore_ascii_case(value.trim()))
        .ok_or_else(|| {
            let names: Vec<&str> = all.iter().map(|item| name(*item)).collect();
            CliError::validation(format!(
                "Invalid {what} '{value}'. Must be one of: {}",
                names.join(", ")
            ))
        })
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("Defaults:");
    println!("  Size:    {}", config.defaults.size);
    println!("  Variant: {}", config.defaults.variant);
    println!("  Glass:   {}", config.defaults.glass);
    println!("  Frame:   {}", config.defaults.frame);
    println!();
    println!("Reconcile:");
    println!(
        "  Reset on frame change: {}",
        config.reconcile.reset_on_frame_change
    );
    println!();
    println!("Paths:");
    println!("  Export directory: {}", config.paths.export_dir().display());
    if let Ok(path) = Config::config_file_path() {
        println!("  Config file:      {}", path.display());
    }
}
