//! Attendance resolver: decides the outcome of a check-in or checkout
//! attempt and enforces the single-active-session invariant under
//! concurrent or duplicate submissions.
//!
//! The check-and-create is NOT read-then-write: the resolver inserts first
//! and lets the partial unique index on `(member_id) WHERE status='in_gym'`
//! reject the duplicate. Two concurrent check-ins for the same member thus
//! resolve to exactly one `Created` and one `AlreadyInGym`, even across
//! independent processes sharing the database file.

use crate::core::codes::resolve_code;
use crate::core::sweeper::close_if_expired;
use crate::db::log::ttlog;
use crate::db::queries::{close_record, find_open_record, get_record, insert_open_record};
use crate::errors::{AppError, AppResult};
use crate::models::exit_type::ExitType;
use crate::models::record::AttendanceRecord;
use crate::models::source::CheckInSource;
use crate::utils::time::trunc_ts;
use chrono::{DateTime, Duration, Local};
use rusqlite::Connection;

/// Outcome of a check-in attempt. Both variants are ordinary business
/// results; only an unresolvable code or a storage failure is an error.
#[derive(Debug)]
pub enum CheckIn {
    /// A new open record was created.
    Created(AttendanceRecord),
    /// The member already has an open session; carries the existing record
    /// so the caller can present "already checked in" instead of failing.
    AlreadyInGym(AttendanceRecord),
}

/// Outcome of a checkout attempt.
#[derive(Debug)]
pub enum CheckOut {
    Closed(AttendanceRecord),
    NotInGym,
}

/// Attempt a check-in for `member_id` with a decoded scan payload.
///
/// Retrying a timed-out call is safe: if the first attempt was applied,
/// the retry deterministically lands in `AlreadyInGym` (idempotent by
/// invariant, not by request id).
pub fn check_in(
    conn: &Connection,
    member_id: &str,
    code: &str,
    source: CheckInSource,
    now: DateTime<Local>,
    max_dwell: Duration,
) -> AppResult<CheckIn> {
    let gym = resolve_code(conn, code)?;

    // Bounded retry: each pass either creates the record, returns the
    // existing open one, or clears an expired leftover and tries again.
    for _ in 0..3 {
        if let Some(id) = insert_open_record(conn, member_id, gym.id, source, now)? {
            ttlog(
                conn,
                "checkin",
                member_id,
                &format!("Checked in at gym {} ({})", gym.id, gym.name),
            )?;
            return Ok(CheckIn::Created(get_record(conn, id)?));
        }

        // Unique-index conflict: someone holds the open slot.
        match find_open_record(conn, member_id)? {
            Some(open) => {
                // A session left open past the dwell limit must not wedge
                // the member; close it the way the sweeper would and retry.
                if let Some(out_time) = close_if_expired(&open, now, max_dwell) {
                    if close_record(conn, open.id, out_time, ExitType::Auto)? {
                        ttlog(
                            conn,
                            "auto_checkout",
                            member_id,
                            &format!("Dwell limit reached for record {}", open.id),
                        )?;
                    }
                    continue;
                }
                return Ok(CheckIn::AlreadyInGym(open));
            }
            // The open record vanished between the conflict and the lookup
            // (a concurrent checkout); the slot is free again.
            None => continue,
        }
    }

    Err(AppError::Other(format!(
        "check-in for member {} kept losing the open-session race",
        member_id
    )))
}

/// Attempt a manual checkout for `member_id`.
pub fn check_out(
    conn: &Connection,
    member_id: &str,
    now: DateTime<Local>,
) -> AppResult<CheckOut> {
    let Some(open) = find_open_record(conn, member_id)? else {
        return Ok(CheckOut::NotInGym);
    };

    // check_out_time must be strictly greater than check_in_time once
    // stored. Storage keeps whole seconds, so the clamp comparison runs at
    // that precision: a scan-out 400ms after check-in lands in the same
    // stored second and must bump to check-in + 1s.
    let now = trunc_ts(now);
    let out_time = if now > open.check_in_time {
        now
    } else {
        open.check_in_time + Duration::seconds(1)
    };

    if close_record(conn, open.id, out_time, ExitType::Manual)? {
        ttlog(
            conn,
            "checkout",
            member_id,
            &format!("Checked out of record {}", open.id),
        )?;
        Ok(CheckOut::Closed(get_record(conn, open.id)?))
    } else {
        // Lost the race with the sweeper or another checkout; there is no
        // open session left to close.
        Ok(CheckOut::NotInGym)
    }
}
