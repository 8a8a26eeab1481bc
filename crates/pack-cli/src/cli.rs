//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Extension pack assembler - fold editor extensions into one pack
#[derive(Parser, Debug)]
#[command(name = "packgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Assemble the pack from the configured extensions
    ///
    /// Fetches third-party extensions, versions and publishes local
    /// ones, then merges manifests, assets and generated sources into
    /// the pack package.
    Assemble {
        /// Path to the pack configuration file
        #[arg(short, long, default_value = "pack.toml")]
        config: PathBuf,

        /// Publish under the beta prefix
        #[arg(long)]
        beta: bool,

        /// Actually publish to the registry instead of a dry run
        #[arg(long)]
        push: bool,
    },

    /// Print the effective configuration and exit
    Config {
        /// Path to the pack configuration file
        #[arg(short, long, default_value = "pack.toml")]
        config: PathBuf,
    },
}
