use crate::db::queries::find_gym_by_code;
use crate::errors::{AppError, AppResult};
use crate::models::gym::Gym;
use rusqlite::Connection;

/// Resolve a decoded scan payload to the gym it belongs to.
///
/// Signing/anti-replay of the payload itself is a collaborator concern;
/// here a code either resolves to exactly one registered gym or fails
/// validation.
pub fn resolve_code(conn: &Connection, code: &str) -> AppResult<Gym> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::InvalidCode("<empty>".to_string()));
    }

    find_gym_by_code(conn, code)?.ok_or_else(|| AppError::InvalidCode(code.to_string()))
}
