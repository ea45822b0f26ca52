use crate::db::pool::DbPool;
use crate::db::queries::load_history;
use crate::errors::AppResult;
use crate::models::record::AttendanceRecord;
use chrono::{DateTime, Local};

/// High-level logic for the `history` command and export.
pub struct HistoryLogic;

impl HistoryLogic {
    /// The member's records from the last `range_days` days (today counts
    /// as day one), most recent first.
    pub fn load(
        pool: &mut DbPool,
        member_id: &str,
        range_days: u32,
        now: DateTime<Local>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        load_history(&pool.conn, member_id, range_days, now.date_naive())
    }
}
