//! Today-status projector: collapses a member's attendance records for the
//! current local calendar day into exactly one presentation state.
//!
//! The projection is recomputed on every call, never cached, so a polling
//! client observes `in_gym → checked_out (auto)` transparently once the
//! dwell limit passes, without any explicit checkout.

use crate::core::sweeper::close_expired_on_read;
use crate::db::queries::{find_open_record, load_day_records};
use crate::errors::AppResult;
use crate::models::today::TodayStatus;
use chrono::{DateTime, Duration, Local};
use rusqlite::Connection;

/// Compute the member's status right now.
///
/// Precedence:
/// 1. an open record, whatever day it started → `InGym`;
/// 2. else the most recent record checked in today and since closed →
///    `CheckedOut` (its `exit_type` tells manual from auto);
/// 3. else → `NotCheckedInToday`.
pub fn today_status(
    conn: &Connection,
    member_id: &str,
    now: DateTime<Local>,
    max_dwell: Duration,
) -> AppResult<TodayStatus> {
    if let Some(open) = find_open_record(conn, member_id)? {
        // Self-healing read: an expired session is closed here and falls
        // through to the checked-out projection below.
        if close_expired_on_read(conn, &open, now, max_dwell)?.is_none() {
            return Ok(TodayStatus::InGym(open));
        }
    }

    // Day records come back most recent by check-in first; with no open
    // session every one of them is closed, so the head is the
    // status-bearing record.
    let today = now.date_naive();
    let status = load_day_records(conn, member_id, today)?
        .into_iter()
        .find(|r| !r.is_open())
        .map(TodayStatus::CheckedOut)
        .unwrap_or(TodayStatus::NotCheckedInToday);

    Ok(status)
}
