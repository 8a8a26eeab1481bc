//! Extension pack assembler CLI
//!
//! The command-line entry point for assembling an extension pack from
//! local and registry-fetched extensions.

mod cli;
mod error;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use pack_pipeline::{PackConfig, Pipeline};
use pack_registry::NpmClient;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Assemble { config, beta, push }) => cmd_assemble(&config, beta, push).await,
        Some(Commands::Config { config }) => cmd_config(&config),
        None => {
            println!("{} Extension pack assembler", "packgen".green().bold());
            println!();
            println!("Run {} for available commands.", "packgen --help".cyan());
            Ok(())
        }
    }
}

async fn cmd_assemble(config_path: &Path, beta: bool, push: bool) -> Result<()> {
    let mut config = PackConfig::load(config_path)?;
    // Flags only turn modes on; the config file remains authoritative
    // when they are absent.
    config.beta = config.beta || beta;
    config.push = config.push || push;

    let registry = Arc::new(NpmClient::new(
        config.package_manager.clone(),
        config.registry.clone(),
    ));
    let report = Pipeline::new(config, registry).run().await?;

    println!("{report}");
    if !report.is_clean() {
        return Err(CliError::user(format!(
            "{} extension(s) failed",
            report.failed.len()
        )));
    }
    Ok(())
}

fn cmd_config(config_path: &Path) -> Result<()> {
    let config = PackConfig::load(config_path)?;
    println!("{config:#?}");
    Ok(())
}
