//! Export command for generating panel documentation.

use crate::cli::common::{load_catalog, load_config, CliError, CliResult};
use crate::cli::replay::run_script;
use crate::export;
use crate::models::ExportSnapshot;
use chrono::{DateTime, Local};
use clap::{Args, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

/// Export document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Markdown summary with slot tables
    Markdown,
    /// JSON export snapshot
    Json,
}

/// Replay a session script and export the resulting panel
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Path to the JSON session script
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Output path (defaults to panel-[size]module-[timestamp] in the export directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Document format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Markdown)]
    pub format: ExportFormat,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let report = run_script(&self.script)?;
        let now = Local::now();

        let content = match self.format {
            ExportFormat::Markdown => {
                let catalog = load_catalog()?;
                export::export_to_markdown(&report.snapshot, &catalog, now)
            }
            ExportFormat::Json => serde_json::to_string_pretty(&report.snapshot)
                .map_err(|e| CliError::io(format!("Failed to serialize snapshot: {e}")))?,
        };

        let export_dir = load_config().paths.export_dir();
        let output_path = self.get_output_path(&report.snapshot, &export_dir, now);

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CliError::io(format!(
                    "Failed to create output directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        fs::write(&output_path, content)
            .map_err(|e| CliError::io(format!("Failed to write output file: {e}")))?;

        println!("✓ Exported panel to: {}", output_path.display());

        Ok(())
    }

    /// Get the output file path (either user-specified or auto-generated)
    fn get_output_path(
        &self,
        snapshot: &ExportSnapshot,
        export_dir: &Path,
        now: DateTime<Local>,
    ) -> PathBuf {
        if let Some(ref path) = self.output {
            return path.clone();
        }

        let filename = export::default_filename(snapshot.size, now);
        let path = export_dir.join(filename);
        match self.format {
            ExportFormat::Markdown => path,
            ExportFormat::Json => path.with_extension("json"),
        }
    }
}
