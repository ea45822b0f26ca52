use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::{CheckIn, check_in};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::source::CheckInSource;
use crate::ui::messages::{info, success};
use chrono::{DateTime, Local};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<Local>) -> AppResult<()> {
    if let Commands::Checkin {
        member,
        code,
        manual,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        let source = if *manual {
            CheckInSource::ManualEntry
        } else {
            CheckInSource::QrScan
        };

        match check_in(&pool.conn, member, code, source, now, cfg.max_dwell())? {
            CheckIn::Created(r) => {
                success(format!(
                    "Checked in: member {} at gym {} ({}).",
                    member,
                    r.gym_id,
                    r.check_in_str()
                ));
            }
            // Not a failure: the member is simply inside already.
            CheckIn::AlreadyInGym(r) => {
                info(format!(
                    "Member {} is already in gym {} since {} (record {}). Use checkout to leave.",
                    member,
                    r.gym_id,
                    r.check_in_str(),
                    r.id
                ));
            }
        }
    }

    Ok(())
}
