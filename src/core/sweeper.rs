//! Auto-checkout sweeper: bounds how long an attendance record may stay
//! open, independent of whether the member ever scans out.
//!
//! The policy is a pure function (`close_if_expired`) applied both by the
//! scheduled `sweep` command and opportunistically on every status read,
//! so a read never disagrees with what a sweep would have produced.

use crate::db::log::ttlog;
use crate::db::queries::{close_record, get_record, load_open_records};
use crate::errors::AppResult;
use crate::models::exit_type::ExitType;
use crate::models::record::AttendanceRecord;
use chrono::{DateTime, Duration, Local};
use rusqlite::Connection;

/// Decide whether an open record has exceeded the dwell limit.
///
/// Returns the closure timestamp, `check_in_time + max_dwell` rather than
/// wall-clock now so the reported duration stays deterministic and capped,
/// or None when the record is closed or still within the limit.
pub fn close_if_expired(
    record: &AttendanceRecord,
    now: DateTime<Local>,
    max_dwell: Duration,
) -> Option<DateTime<Local>> {
    if !record.is_open() {
        return None;
    }

    if now - record.check_in_time >= max_dwell {
        Some(record.check_in_time + max_dwell)
    } else {
        None
    }
}

/// Close every open record past the dwell limit. Returns how many records
/// this run closed. Idempotent: records another closer got to first are
/// skipped by the conditional update.
pub fn sweep(conn: &Connection, now: DateTime<Local>, max_dwell: Duration) -> AppResult<u32> {
    let mut closed = 0;

    for record in load_open_records(conn)? {
        if let Some(out_time) = close_if_expired(&record, now, max_dwell)
            && close_record(conn, record.id, out_time, ExitType::Auto)?
        {
            ttlog(
                conn,
                "auto_checkout",
                &record.member_id,
                &format!("Dwell limit reached for record {}", record.id),
            )?;
            closed += 1;
        }
    }

    Ok(closed)
}

/// Self-healing read: close `record` if it expired and return its current
/// persisted state, or None when it is still legitimately open.
///
/// The caller sees `in_gym` right up until the closure commits; once it
/// does, every subsequent read observes the same closed record.
pub fn close_expired_on_read(
    conn: &Connection,
    record: &AttendanceRecord,
    now: DateTime<Local>,
    max_dwell: Duration,
) -> AppResult<Option<AttendanceRecord>> {
    let Some(out_time) = close_if_expired(record, now, max_dwell) else {
        return Ok(None);
    };

    if close_record(conn, record.id, out_time, ExitType::Auto)? {
        ttlog(
            conn,
            "auto_checkout",
            &record.member_id,
            &format!("Dwell limit reached for record {}", record.id),
        )?;
    }

    // Re-read rather than patching in memory: a racing closer may have won
    // with a different exit type.
    Ok(Some(get_record(conn, record.id)?))
}
