//! gymtrack library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod scanner;
pub mod ui;
pub mod utils;

use chrono::{DateTime, Local};
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher. `at` pins the clock for tests; single-shot
/// commands resolve it once, the kiosk loop re-reads it per scan.
pub fn dispatch(cli: &Cli, cfg: &Config, at: Option<DateTime<Local>>) -> AppResult<()> {
    let now = at.unwrap_or_else(Local::now);
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Gym { .. } => cli::commands::gym::handle(&cli.command, cfg),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg, now),
        Commands::Checkout { .. } => cli::commands::checkout::handle(&cli.command, cfg, now),
        Commands::Status { .. } => cli::commands::status::handle(&cli.command, cfg, now),
        Commands::History { .. } => cli::commands::history::handle(&cli.command, cfg, now),
        Commands::Sweep => cli::commands::sweep::handle(&cli.command, cfg, now),
        Commands::Kiosk { .. } => cli::commands::kiosk::handle(&cli.command, cfg, at),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, now),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once, then apply any DB override from the command line
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // Hidden clock override, for deterministic dwell-limit tests
    let at = match &cli.at {
        Some(s) => Some(utils::time::parse_clock(s)?),
        None => None,
    };

    dispatch(&cli, &cfg, at)
}
