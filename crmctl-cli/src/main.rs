//! crmctl CLI - financial records API
//!
//! Entry point for:
//! - Serving the HTTP API over Postgres or an in-memory store (`serve`)
//! - Creating the records schema ahead of time (`migrate`)
//! - Inspecting and initializing `~/.crmctl/config.toml` (`config`)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "crmctl",
    author,
    version,
    about = "Financial records API: income and expense bookkeeping over HTTP",
    long_about = "Serve a JSON API for recording income and expense entries, listing them \
                  with filters and pagination, and summarizing totals."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the financial records table and indexes
    Migrate(commands::migrate::MigrateArgs),
    /// Manage crmctl configuration (show, path, init)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; values already in the environment win
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Config(args) => commands::run_config(args)?,
    }
    Ok(())
}
