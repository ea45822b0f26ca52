//! Library-level tests for the resolver, sweeper policy and projector,
//! including the concurrent check-in race.

use chrono::{Duration, Local, TimeZone};
use gymtrack::cli::commands::kiosk::run_loop;
use gymtrack::core::projector::today_status;
use gymtrack::core::resolver::{CheckIn, CheckOut, check_in, check_out};
use gymtrack::core::sweeper::close_if_expired;
use gymtrack::db::initialize::init_db;
use gymtrack::db::pool::DbPool;
use gymtrack::db::queries::insert_gym;
use gymtrack::models::exit_type::ExitType;
use gymtrack::models::source::CheckInSource;
use gymtrack::models::today::TodayStatus;
use gymtrack::scanner::decoder::VecFrameSource;
use std::cell::Cell;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Barrier};

const MAX_DWELL_MIN: i64 = 180;

fn setup_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_gymtrack_core.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();

    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    insert_gym(&pool.conn, "Test Gym", "GYM-CODE").expect("gym");

    db_path
}

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[test]
fn test_close_if_expired_policy() {
    let db = setup_db("close_if_expired");
    let pool = DbPool::new(&db).unwrap();

    let t0 = local(2026, 3, 2, 9, 0);
    let dwell = Duration::minutes(MAX_DWELL_MIN);

    let CheckIn::Created(open) =
        check_in(&pool.conn, "m-1", "GYM-CODE", CheckInSource::QrScan, t0, dwell).unwrap()
    else {
        panic!("expected a created record");
    };

    // Below the limit: no closure
    assert!(close_if_expired(&open, t0 + Duration::minutes(179), dwell).is_none());

    // At and past the limit: closes at check-in + limit, not at "now"
    let at_limit = close_if_expired(&open, t0 + Duration::minutes(180), dwell);
    assert_eq!(at_limit, Some(t0 + dwell));

    let way_past = close_if_expired(&open, t0 + Duration::hours(12), dwell);
    assert_eq!(way_past, Some(t0 + dwell));

    // Closed records are never eligible
    let CheckOut::Closed(closed) = check_out(&pool.conn, "m-1", t0 + Duration::hours(1)).unwrap()
    else {
        panic!("expected a closed record");
    };
    assert!(close_if_expired(&closed, t0 + Duration::hours(12), dwell).is_none());
}

#[test]
fn test_projector_reports_auto_exit_type() {
    let db = setup_db("projector_auto");
    let pool = DbPool::new(&db).unwrap();

    let t0 = local(2026, 3, 2, 9, 0);
    let dwell = Duration::minutes(MAX_DWELL_MIN);

    check_in(&pool.conn, "m-2", "GYM-CODE", CheckInSource::QrScan, t0, dwell).unwrap();

    let status =
        today_status(&pool.conn, "m-2", t0 + Duration::minutes(200), dwell).unwrap();

    match status {
        TodayStatus::CheckedOut(r) => {
            assert_eq!(r.exit_type, Some(ExitType::Auto));
            assert_eq!(r.check_out_time, Some(t0 + dwell));
        }
        other => panic!("expected checked_out, got {}", other.as_str()),
    }
}

#[test]
fn test_checkout_within_same_stored_second_still_closes() {
    let db = setup_db("subsecond_checkout");
    let pool = DbPool::new(&db).unwrap();

    let dwell = Duration::minutes(MAX_DWELL_MIN);
    let t0 = local(2026, 3, 2, 9, 0);

    // Scan in at 09:00:00.300, out 400ms later. Storage keeps whole
    // seconds, so both instants land in the same stored second and the
    // checkout must bump to check-in + 1s instead of tripping the
    // strict-inequality constraint.
    let check_in_at = t0 + Duration::milliseconds(300);
    let check_out_at = t0 + Duration::milliseconds(700);

    check_in(&pool.conn, "m-4", "GYM-CODE", CheckInSource::QrScan, check_in_at, dwell).unwrap();

    let CheckOut::Closed(r) = check_out(&pool.conn, "m-4", check_out_at).unwrap() else {
        panic!("expected a closed record");
    };

    assert_eq!(r.check_in_time, t0);
    assert_eq!(r.check_out_time, Some(t0 + Duration::seconds(1)));
    assert!(r.check_out_time.unwrap() > r.check_in_time);
}

#[test]
fn test_kiosk_loop_reads_clock_per_scan() {
    let db = setup_db("kiosk_clock");
    let pool = DbPool::new(&db).unwrap();
    insert_gym(&pool.conn, "Annex Gym", "GYM-CODE-2").unwrap();

    let t0 = local(2026, 3, 2, 9, 0);
    let dwell = Duration::minutes(MAX_DWELL_MIN);

    // Clock advances 200 minutes between scans, past the dwell limit: the
    // second scan must see a later "now", auto-close the leftover and open
    // a fresh record at the second scan's time.
    let calls = Cell::new(0i64);
    let clock = || {
        let n = calls.get();
        calls.set(n + 1);
        t0 + Duration::minutes(200 * n)
    };

    let source = VecFrameSource::new(["GYM-CODE", "GYM-CODE-2"]);
    run_loop(&pool.conn, "m-kiosk", source, clock, dwell).unwrap();

    let mut stmt = pool
        .conn
        .prepare("SELECT check_in_time FROM attendance WHERE member_id = 'm-kiosk' ORDER BY id")
        .unwrap();
    let times: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(times.len(), 2);
    assert_ne!(times[0], times[1], "each scan must be stamped with its own clock reading");
}

#[test]
fn test_checkout_is_not_in_gym_without_open_session() {
    let db = setup_db("not_in_gym");
    let pool = DbPool::new(&db).unwrap();

    let outcome = check_out(&pool.conn, "m-3", local(2026, 3, 2, 9, 0)).unwrap();
    assert!(matches!(outcome, CheckOut::NotInGym));
}

#[test]
fn test_concurrent_checkins_create_exactly_one_record() {
    let db = setup_db("race");
    let now = local(2026, 3, 2, 9, 0);
    let dwell = Duration::minutes(MAX_DWELL_MIN);

    let barrier = Arc::new(Barrier::new(2));
    let mut handles = Vec::new();

    for _ in 0..2 {
        let db = db.clone();
        let barrier = Arc::clone(&barrier);

        handles.push(std::thread::spawn(move || {
            let pool = DbPool::new(&db).expect("open db");
            barrier.wait();
            check_in(&pool.conn, "m-race", "GYM-CODE", CheckInSource::QrScan, now, dwell)
                .expect("check_in")
        }));
    }

    let outcomes: Vec<CheckIn> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();

    let created: Vec<i64> = outcomes
        .iter()
        .filter_map(|o| match o {
            CheckIn::Created(r) => Some(r.id),
            _ => None,
        })
        .collect();
    let already: Vec<i64> = outcomes
        .iter()
        .filter_map(|o| match o {
            CheckIn::AlreadyInGym(r) => Some(r.id),
            _ => None,
        })
        .collect();

    // Exactly one success; the loser sees the winner's record
    assert_eq!(created.len(), 1);
    assert_eq!(already.len(), 1);
    assert_eq!(created[0], already[0]);

    let pool = DbPool::new(&db).unwrap();
    let open_count: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM attendance WHERE member_id = 'm-race' AND status = 'in_gym'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(open_count, 1);
}
