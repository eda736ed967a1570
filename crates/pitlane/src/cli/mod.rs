//! Command-line interface for pitlane.
//!
//! This module provides the CLI structure for the `pitlane` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{ConfigCommand, DbCommand, ServeCommand, WarningsCommand};

/// pitlane - Read-only API over a race team's operations database
///
/// Serves teams, cars, parts and their installation history, sessions and
/// work orders over HTTP, with part wear derived from recorded mileage.
#[derive(Debug, Parser)]
#[command(name = "pitlane")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve(ServeCommand),

    /// Inspect or bootstrap the database
    #[command(subcommand)]
    Db(DbCommand),

    /// List parts due for replacement
    Warnings(WarningsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Warnings(WarningsCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "pitlane");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_with_bind() {
        let cli = Cli::try_parse_from(["pitlane", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        match cli.command {
            Command::Serve(cmd) => assert_eq!(cmd.bind.unwrap().port(), 9000),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve_rejects_bad_address() {
        assert!(Cli::try_parse_from(["pitlane", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn test_parse_db_stats() {
        let cli = Cli::try_parse_from(["pitlane", "db", "stats", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Db(DbCommand::Stats { json: true })));
    }

    #[test]
    fn test_parse_warnings() {
        let cli = Cli::try_parse_from(["pitlane", "warnings"]).unwrap();
        assert!(matches!(cli.command, Command::Warnings(_)));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["pitlane", "-c", "/custom/config.toml", "warnings"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["pitlane", "-vv", "db", "init"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["pitlane", "-q", "config", "path"]).unwrap();
        assert!(cli.quiet);
    }
}
