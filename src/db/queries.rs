use crate::errors::{AppError, AppResult};
use crate::models::exit_type::ExitType;
use crate::models::gym::Gym;
use crate::models::record::AttendanceRecord;
use crate::models::source::CheckInSource;
use crate::models::status::SessionStatus;
use crate::utils::time::{fmt_ts, parse_ts};
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

const RECORD_COLUMNS: &str = "id, member_id, gym_id, check_in_time, check_out_time, \
                              status, exit_type, source, created_at";

pub fn map_row(row: &Row) -> Result<AttendanceRecord> {
    let check_in_str: String = row.get("check_in_time")?;
    let check_in_time = parse_ts(&check_in_str).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTimestamp(check_in_str.clone())),
        )
    })?;

    let check_out_time = match row.get::<_, Option<String>>("check_out_time")? {
        Some(s) => Some(parse_ts(&s).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTimestamp(s.clone())),
            )
        })?),
        None => None,
    };

    let status_str: String = row.get("status")?;
    let status = SessionStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })?;

    let exit_type = match row.get::<_, Option<String>>("exit_type")? {
        Some(s) => Some(ExitType::from_db_str(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidExitType(s.clone())),
            )
        })?),
        None => None,
    };

    let source_str: String = row.get("source")?;
    let source = CheckInSource::from_db_str(&source_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidSource(source_str.clone())),
        )
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        member_id: row.get("member_id")?,
        gym_id: row.get("gym_id")?,
        check_in_time,
        check_out_time,
        status,
        exit_type,
        source,
        created_at: row.get("created_at")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Insert a new open attendance record for `member_id` at `gym_id`.
///
/// This is the single conditional write that enforces the
/// single-active-session invariant: the partial unique index
/// `idx_attendance_open_member` rejects a second open row for the same
/// member, and the violation surfaces here as `Ok(None)`.
pub fn insert_open_record(
    conn: &Connection,
    member_id: &str,
    gym_id: i64,
    source: CheckInSource,
    now: DateTime<Local>,
) -> AppResult<Option<i64>> {
    let res = conn.execute(
        "INSERT INTO attendance
             (member_id, gym_id, check_in_date, check_in_time, status, source, created_at)
         VALUES (?1, ?2, ?3, ?4, 'in_gym', ?5, ?6)",
        params![
            member_id,
            gym_id,
            now.date_naive().format("%Y-%m-%d").to_string(),
            fmt_ts(now),
            source.to_db_str(),
            Local::now().to_rfc3339(),
        ],
    );

    match res {
        Ok(_) => Ok(Some(conn.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The member's open record, if any, regardless of gym or day.
pub fn find_open_record(conn: &Connection, member_id: &str) -> AppResult<Option<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {RECORD_COLUMNS} FROM attendance
         WHERE member_id = ?1 AND status = 'in_gym'"
    ))?;

    Ok(stmt.query_row([member_id], map_row).optional()?)
}

pub fn get_record(conn: &Connection, id: i64) -> AppResult<AttendanceRecord> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {RECORD_COLUMNS} FROM attendance WHERE id = ?1"
    ))?;

    Ok(stmt.query_row([id], map_row)?)
}

/// Close an open record. Conditional on `status = 'in_gym'`, so closing an
/// already-closed record is a no-op and two racing closers resolve to one
/// winner. Returns whether this call performed the close.
pub fn close_record(
    conn: &Connection,
    id: i64,
    out_time: DateTime<Local>,
    exit_type: ExitType,
) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE attendance
         SET check_out_time = ?2, status = 'checked_out', exit_type = ?3
         WHERE id = ?1 AND status = 'in_gym'",
        params![id, fmt_ts(out_time), exit_type.to_db_str()],
    )?;

    Ok(changed == 1)
}

/// All open records, oldest check-in first. Used by the sweeper.
pub fn load_open_records(conn: &Connection) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {RECORD_COLUMNS} FROM attendance
         WHERE status = 'in_gym'
         ORDER BY check_in_time ASC"
    ))?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The member's records checked in on `date` (local), most recent first.
pub fn load_day_records(
    conn: &Connection,
    member_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {RECORD_COLUMNS} FROM attendance
         WHERE member_id = ?1 AND check_in_date = ?2
         ORDER BY check_in_time DESC, id DESC"
    ))?;

    let rows = stmt.query_map(
        params![member_id, date.format("%Y-%m-%d").to_string()],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The member's records from the last `range_days` days (inclusive of
/// today), most recent first.
pub fn load_history(
    conn: &Connection,
    member_id: &str,
    range_days: u32,
    today: NaiveDate,
) -> AppResult<Vec<AttendanceRecord>> {
    let cutoff = today - chrono::Duration::days(i64::from(range_days.saturating_sub(1)));

    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {RECORD_COLUMNS} FROM attendance
         WHERE member_id = ?1 AND check_in_date >= ?2
         ORDER BY check_in_time DESC, id DESC"
    ))?;

    let rows = stmt.query_map(
        params![member_id, cutoff.format("%Y-%m-%d").to_string()],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Gym registry
// ---------------------------

fn map_gym(row: &Row) -> Result<Gym> {
    Ok(Gym {
        id: row.get("id")?,
        name: row.get("name")?,
        qr_code: row.get("qr_code")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_gym(conn: &Connection, name: &str, qr_code: &str) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO gyms (name, qr_code, created_at) VALUES (?1, ?2, ?3)",
        params![name, qr_code, Local::now().to_rfc3339()],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => {
            Err(AppError::DuplicateGymCode(qr_code.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve a decoded scan payload to its gym, or None when the code is
/// unknown.
pub fn find_gym_by_code(conn: &Connection, qr_code: &str) -> AppResult<Option<Gym>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, qr_code, created_at FROM gyms WHERE qr_code = ?1",
    )?;

    Ok(stmt.query_row([qr_code], map_gym).optional()?)
}

pub fn list_gyms(conn: &Connection) -> AppResult<Vec<Gym>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name, qr_code, created_at FROM gyms ORDER BY id ASC")?;

    let rows = stmt.query_map([], map_gym)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
