use super::{exit_type::ExitType, source::CheckInSource, status::SessionStatus};
use chrono::{DateTime, Local};
use serde::Serialize;

/// A single attendance session for one member at one gym.
///
/// Created only by a successful check-in; mutated exactly once (manual or
/// auto checkout) to transition `in_gym → checked_out`; never deleted.
/// Fields other than `check_out_time`, `status` and `exit_type` are
/// immutable after creation.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub member_id: String,
    pub gym_id: i64,
    pub check_in_time: DateTime<Local>,   // ⇔ attendance.check_in_time (TEXT, RFC 3339)
    pub check_out_time: Option<DateTime<Local>>, // ⇔ attendance.check_out_time
    pub status: SessionStatus,            // ⇔ attendance.status ('in_gym' | 'checked_out')
    pub exit_type: Option<ExitType>,      // ⇔ attendance.exit_type ('manual' | 'auto' | NULL)
    pub source: CheckInSource,            // ⇔ attendance.source ('qr_scan' | 'manual_entry')
    pub created_at: String,               // ⇔ attendance.created_at (TEXT, RFC 3339)
}

impl AttendanceRecord {
    pub fn check_in_str(&self) -> String {
        self.check_in_time.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn check_out_str(&self) -> String {
        self.check_out_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }

    /// Minutes spent in the gym so far (open record) or in total (closed).
    pub fn dwell_minutes(&self, now: DateTime<Local>) -> i64 {
        let end = self.check_out_time.unwrap_or(now);
        (end - self.check_in_time).num_minutes()
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}
