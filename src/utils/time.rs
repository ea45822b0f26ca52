//! Time utilities: timestamp storage format, parsing overrides, formatting.
//!
//! Timestamps are stored as UTC RFC 3339 with a trailing `Z` and whole
//! seconds ("2026-08-23T08:15:00Z"). The fixed width keeps lexicographic
//! ordering equal to chronological ordering, which the schema CHECK
//! constraints rely on. Day scoping uses the separate local
//! `check_in_date` column instead.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, Utc};

/// Format a timestamp for storage.
pub fn fmt_ts(t: DateTime<Local>) -> String {
    t.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Truncate to whole seconds, the precision `fmt_ts` stores at.
/// Comparisons that feed a stored write must happen at this precision,
/// or a sub-second difference vanishes in storage.
pub fn trunc_ts(t: DateTime<Local>) -> DateTime<Local> {
    t - chrono::Duration::nanoseconds(i64::from(t.timestamp_subsec_nanos()))
}

/// Parse a stored timestamp back into local time.
pub fn parse_ts(s: &str) -> AppResult<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Local))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Parse a user-supplied clock override: RFC 3339 or local
/// "YYYY-MM-DD HH:MM".
pub fn parse_clock(s: &str) -> AppResult<DateTime<Local>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Local));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))?;

    naive
        .and_local_timezone(Local)
        .single()
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}
