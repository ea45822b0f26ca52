use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::projector::today_status;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::exit_type::ExitType;
use crate::models::today::TodayStatus;
use crate::utils::time::format_minutes;
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Status { member } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match today_status(&pool.conn, member, now, cfg.max_dwell())? {
            TodayStatus::NotCheckedInToday => {
                println!("not_checked_in_today");
                println!("Member {} has not checked in today.", member);
            }
            TodayStatus::InGym(r) => {
                println!("in_gym");
                println!(
                    "Member {} is in gym {} since {} ({} so far).",
                    member,
                    r.gym_id,
                    r.check_in_str(),
                    format_minutes(r.dwell_minutes(now))
                );
            }
            TodayStatus::CheckedOut(r) => {
                println!("checked_out");
                match r.exit_type {
                    Some(ExitType::Auto) => println!(
                        "Member {} was checked out automatically at {} (dwell limit).",
                        member,
                        r.check_out_str()
                    ),
                    _ => println!(
                        "Member {} checked out at {} ({} in gym {}).",
                        member,
                        r.check_out_str(),
                        format_minutes(r.dwell_minutes(now)),
                        r.gym_id
                    ),
                }
            }
        }
    }

    Ok(())
}
