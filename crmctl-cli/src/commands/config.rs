//! `crmctl config` - inspect and initialize the config file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crmctl_core::CrmConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config file to operate on (default: ~/.crmctl/config.toml)
    #[arg(long, global = true, env = "CRMCTL_CONFIG")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective config as TOML
    Show,
    /// Show config file path
    Path,
    /// Write a config file with default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    let path = args.file.unwrap_or_else(CrmConfig::config_path);

    match args.command {
        ConfigCommands::Show => run_show(&path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Init(init) => run_init(&path, init),
    }
}

fn run_show(path: &std::path::Path) -> Result<()> {
    let config = CrmConfig::load_from(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_init(path: &std::path::Path, args: InitArgs) -> Result<()> {
    if path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}\n\nUse --force to overwrite",
            path.display()
        ));
    }

    CrmConfig::default()
        .save_to(path)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Created config at: {}", path.display());
    println!("\nNext steps:");
    println!("  1. Set [database] url (or export DATABASE_URL)");
    println!("  2. Run: crmctl migrate");
    println!("  3. Run: crmctl serve");
    Ok(())
}
