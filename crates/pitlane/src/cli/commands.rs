//! CLI command definitions.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on, overriding the configuration
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,
}

/// Database commands.
#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Create the database and its tables if they don't exist
    Init,

    /// Show row counts per table
    Stats {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Warnings command arguments.
#[derive(Debug, Args)]
pub struct WarningsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
