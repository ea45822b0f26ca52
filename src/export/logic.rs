use crate::core::history::HistoryLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::csv::write_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::write_json;
use crate::export::notify_export_success;
use crate::ui::messages::warning;
use chrono::{DateTime, Local};
use std::io;
use std::path::Path;

/// High-level export logic for attendance history.
pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        pool: &mut DbPool,
        format: &ExportFormat,
        file: &str,
        member_id: &str,
        range_days: u32,
        force: bool,
        now: DateTime<Local>,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::from(io::Error::other(format!(
                "Output file path must be absolute: {file}"
            ))));
        }

        ensure_writable(path, force)?;

        let records = HistoryLogic::load(pool, member_id, range_days, now)?;

        if records.is_empty() {
            warning(format!(
                "No attendance records found for member {} in the last {} day(s).",
                member_id, range_days
            ));
            return Ok(());
        }

        match format {
            ExportFormat::Csv => write_csv(path, &records)?,
            ExportFormat::Json => write_json(path, &records)?,
        }

        notify_export_success(format.as_str(), path);

        Ok(())
    }
}
