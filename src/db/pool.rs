//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        // Concurrent kiosk processes share the same file; wait instead of
        // failing with SQLITE_BUSY when another writer holds the lock.
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self { conn })
    }
}
