//! HTTP server command for the financial records API

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use crmctl_core::CrmConfig;
use crmctl_server::{run_server, MemoryConnector, PgConnector, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: [server] bind from config, else 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// In-memory store instead of Postgres; records are lost on exit.
    /// Any database URL is ignored.
    #[arg(long)]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let file = CrmConfig::load().context("Failed to load crmctl config")?;

    let config = ServerConfig {
        bind_addr: args.bind.unwrap_or(file.server.bind),
        cors_permissive: args.cors_permissive || file.server.cors_permissive,
    };

    tracing::info!("Starting crmctl server on {}", config.bind_addr);

    // Run server (blocks until shutdown); the store is connected on first request
    if args.memory {
        tracing::warn!("Using in-memory store; records will not survive a restart");
        run_server(MemoryConnector::default(), config)
            .await
            .context("Server error")?;
    } else {
        let database_url = args.database_url.unwrap_or_else(|| file.database_url());
        run_server(PgConnector::new(database_url), config)
            .await
            .context("Server error")?;
    }

    Ok(())
}
