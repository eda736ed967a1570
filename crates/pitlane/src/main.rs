//! `pitlane` - CLI for the pitlane API
//!
//! Runs the HTTP server and offers a few offline views of the same database.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;

use pitlane::api::{self, PartView};
use pitlane::cli::{Cli, Command, ConfigCommand, DbCommand};
use pitlane::{init_logging, Config, Storage};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Serve(serve_cmd) => {
            let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
            runtime.block_on(api::serve(&config, serve_cmd.bind))?;
        }
        Command::Db(db_cmd) => handle_db(&config, &db_cmd)?,
        Command::Warnings(warnings_cmd) => handle_warnings(&config, warnings_cmd.json)?,
        Command::Config(config_cmd) => handle_config(&config, cli.config, config_cmd)?,
    }
    Ok(())
}

fn handle_db(config: &Config, cmd: &DbCommand) -> Result<()> {
    let path = config.database_path();
    match cmd {
        DbCommand::Init => {
            Storage::open(&path)?;
            println!("Database ready at {}", path.display());
        }
        DbCommand::Stats { json } => {
            let stats = Storage::open_read_only(&path)?.stats()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Database: {}", path.display());
                println!("Size:     {} bytes", stats.db_size_bytes);
                println!();
                for table in &stats.tables {
                    println!("  {:<20} {:>8}", table.table, table.rows);
                }
            }
        }
    }
    Ok(())
}

fn handle_warnings(config: &Config, json: bool) -> Result<()> {
    let storage = Storage::open_read_only(config.database_path())?;
    let warnings = storage.lifecycle_warnings()?;

    if json {
        let views: Vec<PartView> = warnings
            .into_iter()
            .map(|(part, derived)| PartView::new(part, derived))
            .collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    if warnings.is_empty() {
        println!("No parts need replacement.");
        return Ok(());
    }

    println!(
        "{:<6} {:<16} {:<14} {:>8} {:>8}",
        "ID", "TYPE", "SERIAL", "MILEAGE", "WEAR %"
    );
    for (part, derived) in &warnings {
        println!(
            "{:<6} {:<16} {:<14} {:>8} {:>8.1}",
            part.part_id,
            part.part_type,
            part.serial_number,
            derived
                .current_mileage
                .map_or_else(|| "-".to_string(), |m| m.to_string()),
            derived.lifecycle.percentage().unwrap_or_default(),
        );
    }
    Ok(())
}

fn handle_config(
    config: &Config,
    config_path: Option<std::path::PathBuf>,
    cmd: ConfigCommand,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Database]");
                println!("  Path:               {}", config.database_path().display());
                println!();
                println!("[Server]");
                println!("  Bind address:       {}", config.server.bind_address);
                println!();
                println!("[Pagination]");
                println!("  Page size:          {}", config.pagination.page_size);
                println!("  Max page size:      {}", config.pagination.max_page_size);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
