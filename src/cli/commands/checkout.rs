use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::{CheckOut, check_out};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::time::format_minutes;
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Checkout { member } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        match check_out(&pool.conn, member, now)? {
            CheckOut::Closed(r) => {
                success(format!(
                    "Checked out: member {} left gym {} after {} ({} → {}).",
                    member,
                    r.gym_id,
                    format_minutes(r.dwell_minutes(now)),
                    r.check_in_str(),
                    r.check_out_str()
                ));
            }
            CheckOut::NotInGym => {
                warning(format!("Member {} has no open session to check out.", member));
            }
        }
    }

    Ok(())
}
