//! Panelsmith - headless touch panel builder
//!
//! Lists panel layouts and icons, replays builder session scripts and
//! exports the resulting panels.

use clap::{Parser, Subcommand};
use panelsmith::cli::{ConfigArgs, ExportArgs, IconsArgs, LayoutsArgs, ReplayArgs};
use panelsmith::constants::APP_NAME;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Panelsmith - design touch control panels from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List panel sizes and variants, or describe one layout
    Layouts(LayoutsArgs),
    /// List icons in the catalog
    Icons(IconsArgs),
    /// Replay a session script and print the resulting panel
    Replay(ReplayArgs),
    /// Replay a session script and export the resulting panel
    Export(ExportArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Command::Layouts(args) => args.execute(),
        Command::Icons(args) => args.execute(),
        Command::Replay(args) => args.execute(),
        Command::Export(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.code.code())
        }
    }
}
