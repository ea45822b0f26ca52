use crate::models::record::AttendanceRecord;
use crate::utils::time::fmt_ts;
use csv::Writer;
use std::path::Path;

/// Write attendance records as CSV.
pub fn write_csv(path: &Path, records: &[AttendanceRecord]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "id",
        "member_id",
        "gym_id",
        "check_in_time",
        "check_out_time",
        "status",
        "exit_type",
        "source",
    ])?;

    for r in records {
        wtr.write_record(&[
            r.id.to_string(),
            r.member_id.clone(),
            r.gym_id.to_string(),
            fmt_ts(r.check_in_time),
            r.check_out_time.map(fmt_ts).unwrap_or_default(),
            r.status.to_db_str().to_string(),
            r.exit_type.map(|e| e.to_db_str().to_string()).unwrap_or_default(),
            r.source.to_db_str().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
