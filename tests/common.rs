#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn gt() -> Command {
    cargo_bin_cmd!("gymtrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_gymtrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema and register one gym whose QR payload is `code`
pub fn init_db_with_gym(db_path: &str, code: &str) {
    gt().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    gt().args(["--db", db_path, "gym", "--add", "Main Street Gym", "--code", code])
        .assert()
        .success();
}

/// Check a member in at a fixed clock time
pub fn checkin_at(db_path: &str, member: &str, code: &str, at: &str) {
    gt().args([
        "--db", db_path, "--at", at, "checkin", member, "--code", code,
    ])
    .assert()
    .success();
}

/// Check a member out at a fixed clock time
pub fn checkout_at(db_path: &str, member: &str, at: &str) {
    gt().args(["--db", db_path, "--at", at, "checkout", member])
        .assert()
        .success();
}

/// Count attendance rows for a member directly in SQLite
pub fn count_records(db_path: &str, member: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE member_id = ?1",
        [member],
        |row| row.get(0),
    )
    .expect("count")
}

/// Count open attendance rows for a member directly in SQLite
pub fn count_open_records(db_path: &str, member: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT COUNT(*) FROM attendance WHERE member_id = ?1 AND status = 'in_gym'",
        [member],
        |row| row.get(0),
    )
    .expect("count open")
}
