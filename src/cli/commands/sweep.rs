use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::sweeper::sweep;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if matches!(cmd, Commands::Sweep) {
        let pool = DbPool::new(&cfg.database)?;

        let closed = sweep(&pool.conn, now, cfg.max_dwell())?;

        if closed == 0 {
            info("No sessions past the dwell limit.");
        } else {
            success(format!("Closed {} expired session(s).", closed));
        }
    }

    Ok(())
}
