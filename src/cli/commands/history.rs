use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::HistoryLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::time::format_minutes;
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::History { member, days } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let records = HistoryLogic::load(&mut pool, member, *days, now)?;

        if records.is_empty() {
            println!(
                "No attendance records for member {} in the last {} day(s).",
                member, days
            );
            return Ok(());
        }

        println!(
            "Attendance for member {} (last {} day(s), most recent first):\n",
            member, days
        );

        for r in &records {
            let out = if r.is_open() {
                "—".to_string()
            } else {
                r.check_out_str()
            };
            let exit = r.exit_type.map(|e| e.to_db_str()).unwrap_or("");

            println!(
                "#{:<5} gym {:<4} | {} → {:<16} | {:<11} {:<6} | {} | {}",
                r.id,
                r.gym_id,
                r.check_in_str(),
                out,
                r.status.to_db_str(),
                exit,
                format_minutes(r.dwell_minutes(now)),
                r.source.to_db_str(),
            );
        }
    }

    Ok(())
}
