use predicates::str::contains;

mod common;
use common::{checkin_at, count_open_records, gt, init_db_with_gym, setup_test_db};

fn check_out_column(db: &str, member: &str) -> (String, String) {
    let conn = rusqlite::Connection::open(db).expect("open db");
    conn.query_row(
        "SELECT exit_type, check_out_time FROM attendance WHERE member_id = ?1",
        [member],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .expect("row")
}

#[test]
fn test_sweep_closes_expired_sessions() {
    let db = setup_test_db("sweep_expired");
    init_db_with_gym(&db, "GYM-A-SECRET");

    checkin_at(&db, "m-10", "GYM-A-SECRET", "2026-03-02 06:00");

    gt().args(["--db", &db, "--at", "2026-03-02 10:00", "sweep"])
        .assert()
        .success()
        .stdout(contains("Closed 1 expired session"));

    assert_eq!(count_open_records(&db, "m-10"), 0);

    let (exit_type, _) = check_out_column(&db, "m-10");
    assert_eq!(exit_type, "auto");
}

#[test]
fn test_sweep_leaves_fresh_sessions_open() {
    let db = setup_test_db("sweep_fresh");
    init_db_with_gym(&db, "GYM-A-SECRET");

    checkin_at(&db, "m-11", "GYM-A-SECRET", "2026-03-02 09:00");

    gt().args(["--db", &db, "--at", "2026-03-02 10:00", "sweep"])
        .assert()
        .success()
        .stdout(contains("No sessions past the dwell limit"));

    assert_eq!(count_open_records(&db, "m-11"), 1);
}

#[test]
fn test_sweep_is_idempotent() {
    let db = setup_test_db("sweep_idempotent");
    init_db_with_gym(&db, "GYM-A-SECRET");

    checkin_at(&db, "m-12", "GYM-A-SECRET", "2026-03-02 06:00");

    gt().args(["--db", &db, "--at", "2026-03-02 10:00", "sweep"])
        .assert()
        .success();

    let first = check_out_column(&db, "m-12");

    // Sweeping again, even later, changes nothing
    gt().args(["--db", &db, "--at", "2026-03-02 14:00", "sweep"])
        .assert()
        .success()
        .stdout(contains("No sessions past the dwell limit"));

    let second = check_out_column(&db, "m-12");
    assert_eq!(first, second);
}

#[test]
fn test_expired_leftover_does_not_block_new_checkin() {
    let db = setup_test_db("sweep_reentry");
    init_db_with_gym(&db, "GYM-A-SECRET");

    // Session from the morning was never closed
    checkin_at(&db, "m-13", "GYM-A-SECRET", "2026-03-02 06:00");

    // Evening scan: the leftover is auto-closed and a fresh session opens
    gt().args([
        "--db", &db, "--at", "2026-03-02 18:00", "checkin", "m-13", "--code", "GYM-A-SECRET",
    ])
    .assert()
    .success()
    .stdout(contains("Checked in"));

    assert_eq!(count_open_records(&db, "m-13"), 1);

    let conn = rusqlite::Connection::open(&db).expect("open db");
    let auto_closed: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM attendance
             WHERE member_id = 'm-13' AND status = 'checked_out' AND exit_type = 'auto'",
            [],
            |row| row.get(0),
        )
        .expect("count");
    assert_eq!(auto_closed, 1);
}
