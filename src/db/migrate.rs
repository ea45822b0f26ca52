use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `attendance` table has a `source` column.
fn attendance_has_source_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('attendance')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "source" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `gyms` registry table.
fn create_gyms_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS gyms (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            qr_code    TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `attendance` table with the modern schema.
///
/// The partial unique index `idx_attendance_open_member` is the
/// single-active-session invariant: at most one row per member may carry
/// `status = 'in_gym'`. Concurrent check-ins for the same member race on
/// this index, and the loser gets a constraint violation instead of a
/// duplicate open session.
fn create_attendance_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            member_id      TEXT NOT NULL,
            gym_id         INTEGER NOT NULL REFERENCES gyms(id),
            check_in_date  TEXT NOT NULL,
            check_in_time  TEXT NOT NULL,
            check_out_time TEXT,
            status         TEXT NOT NULL DEFAULT 'in_gym'
                           CHECK(status IN ('in_gym','checked_out')),
            exit_type      TEXT CHECK(exit_type IN ('manual','auto')),
            source         TEXT NOT NULL DEFAULT 'qr_scan'
                           CHECK(source IN ('qr_scan','manual_entry')),
            created_at     TEXT NOT NULL,
            CHECK(check_out_time IS NULL OR check_out_time > check_in_time),
            CHECK((status = 'checked_out') = (check_out_time IS NOT NULL)),
            CHECK((exit_type IS NOT NULL) = (check_out_time IS NOT NULL))
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_open_member
            ON attendance(member_id) WHERE status = 'in_gym';
        CREATE INDEX IF NOT EXISTS idx_attendance_member_date
            ON attendance(member_id, check_in_date);
        "#,
    )?;
    Ok(())
}

/// Add the `source` column to databases created before v0.2.0, when every
/// check-in was implicitly a QR scan.
fn migrate_add_source_column(conn: &Connection) -> Result<()> {
    let version = "20260214_0002_add_checkin_source";

    // 1) Skip if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if attendance_has_source_column(conn)? {
        // Fresh schema already carries the column; just record the marker.
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'source column present')",
            [version],
        )?;
        return Ok(());
    }

    // 2) Apply the migration
    conn.execute(
        "ALTER TABLE attendance ADD COLUMN source TEXT NOT NULL DEFAULT 'qr_scan'
         CHECK(source IN ('qr_scan','manual_entry'));",
        [],
    )?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added source column to attendance')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'source' to attendance table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Registry first: attendance references gyms
    let gyms_existed = table_exists(conn, "gyms")?;
    create_gyms_table(conn)?;
    if !gyms_existed {
        success("Created gyms table.");
    }

    // 3) Attendance table and indexes
    let attendance_existed = table_exists(conn, "attendance")?;
    create_attendance_table(conn)?;
    if !attendance_existed {
        success("Created attendance table (modern schema).");
    } else {
        // Re-assert indexes on existing databases
        conn.execute_batch(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_open_member
                ON attendance(member_id) WHERE status = 'in_gym';
            CREATE INDEX IF NOT EXISTS idx_attendance_member_date
                ON attendance(member_id, check_in_date);
            "#,
        )?;

        migrate_add_source_column(conn)?;
    }

    Ok(())
}
