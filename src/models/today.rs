use super::record::AttendanceRecord;

/// Derived, single-valued presentation state for "where is this member
/// right now", computed from the member's records for the current local
/// calendar day. Exactly one of the three variants holds.
#[derive(Debug, Clone)]
pub enum TodayStatus {
    /// No open record and no record dated today.
    NotCheckedInToday,
    /// An open record exists (whatever day it was opened on).
    InGym(AttendanceRecord),
    /// No open record, but at least one record closed today; carries the
    /// most recent one by check-in time. `record.exit_type` tells whether
    /// the member left or the dwell limit kicked them out.
    CheckedOut(AttendanceRecord),
}

impl TodayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TodayStatus::NotCheckedInToday => "not_checked_in_today",
            TodayStatus::InGym(_) => "in_gym",
            TodayStatus::CheckedOut(_) => "checked_out",
        }
    }
}
