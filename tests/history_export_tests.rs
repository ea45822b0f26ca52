use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{checkin_at, checkout_at, gt, init_db_with_gym, setup_test_db, temp_out};

#[test]
fn test_history_lists_most_recent_first() {
    let db = setup_test_db("history_order");
    init_db_with_gym(&db, "GYM-A-SECRET");

    checkin_at(&db, "m-20", "GYM-A-SECRET", "2026-03-01 09:00");
    checkout_at(&db, "m-20", "2026-03-01 10:00");
    checkin_at(&db, "m-20", "GYM-A-SECRET", "2026-03-02 18:00");
    checkout_at(&db, "m-20", "2026-03-02 19:00");

    let output = gt()
        .args(["--db", &db, "--at", "2026-03-03 08:00", "history", "m-20", "--days", "7"])
        .assert()
        .success()
        .stdout(contains("2026-03-01 09:00").and(contains("2026-03-02 18:00")))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8_lossy(&output);
    let first = text.find("2026-03-02 18:00").expect("recent entry");
    let second = text.find("2026-03-01 09:00").expect("older entry");
    assert!(first < second, "most recent record must come first");
}

#[test]
fn test_history_respects_range_days() {
    let db = setup_test_db("history_range");
    init_db_with_gym(&db, "GYM-A-SECRET");

    checkin_at(&db, "m-21", "GYM-A-SECRET", "2026-02-01 09:00");
    checkout_at(&db, "m-21", "2026-02-01 10:00");
    checkin_at(&db, "m-21", "GYM-A-SECRET", "2026-03-02 09:00");
    checkout_at(&db, "m-21", "2026-03-02 10:00");

    gt().args(["--db", &db, "--at", "2026-03-03 08:00", "history", "m-21", "--days", "7"])
        .assert()
        .success()
        .stdout(contains("2026-03-02").and(contains("2026-02-01").not()));
}

#[test]
fn test_export_csv_history() {
    let db = setup_test_db("export_csv");
    init_db_with_gym(&db, "GYM-A-SECRET");

    checkin_at(&db, "m-22", "GYM-A-SECRET", "2026-03-02 09:00");
    checkout_at(&db, "m-22", "2026-03-02 10:00");

    let out = temp_out("export_csv", "csv");

    gt().args([
        "--db", &db, "--at", "2026-03-02 11:00",
        "export", "m-22", "--format", "csv", "--file", &out, "--days", "7",
    ])
    .assert()
    .success()
    .stdout(contains("csv export completed"));

    let content = fs::read_to_string(&out).expect("read export");
    assert!(content.contains("member_id"));
    assert!(content.contains("m-22"));
    assert!(content.contains("checked_out"));
    assert!(content.contains("manual"));
}

#[test]
fn test_export_json_history() {
    let db = setup_test_db("export_json");
    init_db_with_gym(&db, "GYM-A-SECRET");

    checkin_at(&db, "m-23", "GYM-A-SECRET", "2026-03-02 09:00");

    let out = temp_out("export_json", "json");

    gt().args([
        "--db", &db, "--at", "2026-03-02 09:30",
        "export", "m-23", "--format", "json", "--file", &out, "--days", "7",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read export");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(parsed[0]["member_id"], "m-23");
    assert_eq!(parsed[0]["status"], "in_gym");
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let db = setup_test_db("export_force");
    init_db_with_gym(&db, "GYM-A-SECRET");

    checkin_at(&db, "m-24", "GYM-A-SECRET", "2026-03-02 09:00");

    let out = temp_out("export_force", "csv");
    fs::write(&out, "existing").expect("seed file");

    gt().args([
        "--db", &db, "export", "m-24", "--format", "csv", "--file", &out,
    ])
    .assert()
    .failure()
    .stderr(contains("already exists"));
}
