//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use crmctl_core::CrmConfig;
use crmctl_server::db::{create_pool, migrations};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the records schema without starting the server
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = match args.database_url {
        Some(url) => url,
        None => CrmConfig::load()
            .context("Failed to load crmctl config")?
            .database_url(),
    };

    let pool = create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    println!("Financial records schema is up to date");
    Ok(())
}
