//! Panelsmith Web Server Binary
//!
//! This binary starts the Panelsmith web server that exposes one in-memory
//! builder session over a REST API.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001)
//! panelsmith-web
//!
//! # Specify host and port
//! panelsmith-web --host 0.0.0.0 --port 8080
//! ```

use std::net::SocketAddr;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use panelsmith::config::Config;
use panelsmith::web;

/// Panelsmith Web Server - REST API for the panel builder
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load or create configuration
    let config = Config::load().unwrap_or_default();
    info!(
        size = %config.defaults.size,
        variant = %config.defaults.variant,
        "Starting session"
    );

    // Build socket address
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    // Start the server
    web::run_server(config, addr).await
}
