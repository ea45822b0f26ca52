use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_gym, list_gyms};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Gym { add, code, list } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        if let Some(name) = add {
            let code = code
                .as_deref()
                .ok_or_else(|| AppError::Config("--add requires --code".to_string()))?;

            let id = insert_gym(&pool.conn, name, code)?;
            ttlog(
                &pool.conn,
                "gym_add",
                &id.to_string(),
                &format!("Registered gym '{}'", name),
            )?;
            success(format!("Registered gym '{}' (id {}).", name, id));
        }

        if *list {
            let gyms = list_gyms(&pool.conn)?;

            if gyms.is_empty() {
                println!("No gyms registered yet.");
            } else {
                println!("Registered gyms:\n");
                for g in gyms {
                    println!("{:>4}: {:<24} code={}", g.id, g.name, g.qr_code);
                }
            }
        }
    }

    Ok(())
}
