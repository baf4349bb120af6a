//! Session script replay.

use crate::cli::common::{load_catalog, load_config, print_json, CliError, CliResult};
use crate::services::script::{ReplayReport, SessionScript};
use clap::Args;
use std::path::{Path, PathBuf};

/// Replay a session script and print the resulting panel
#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Path to the JSON session script
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

impl ReplayArgs {
    /// Execute the replay command
    pub fn execute(&self) -> CliResult<()> {
        let report = run_script(&self.script)?;

        if self.json {
            return print_json(&report);
        }

        let snapshot = &report.snapshot;
        println!(
            "{} / {} ({} glass, {} frame)",
            snapshot.size, snapshot.variant, snapshot.glass, snapshot.frame
        );
        println!("{} of {} slots occupied", snapshot.occupied(), snapshot.total_slots);
        for slot in &snapshot.icons {
            println!(
                "  {:>2}. {:<8} {}",
                slot.slot + 1,
                slot.kind.display_name(),
                slot.icon.name
            );
        }

        if !report.notifications.is_empty() {
            println!();
            println!("Notifications:");
            for notification in &report.notifications {
                println!("  [{}] {notification}", notification.severity());
            }
        }
        Ok(())
    }
}

/// Loads and replays a script with the user's configuration.
pub fn run_script(path: &Path) -> CliResult<ReplayReport> {
    if !path.exists() {
        return Err(CliError::io(format!("Script not found: {}", path.display())));
    }

    let script = SessionScript::from_file(path).map_err(|e| CliError::validation(format!("{e:#}")))?;
    let config = load_config();
    let catalog = load_catalog()?;

    script
        .replay(catalog, &config.defaults.builder_config(), config.reconcile.policy())
        .map_err(|e| CliError::validation(format!("Replay failed: {e:#}")))
}
