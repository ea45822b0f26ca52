use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::resolver::{CheckIn, check_in};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::source::CheckInSource;
use crate::scanner::decoder::{FrameSource, LineFrameSource, ScanDecoder};
use crate::scanner::guard::ScanGuard;
use crate::ui::messages::{error, info, success, warning};
use chrono::{DateTime, Duration, Local};
use std::io;

/// Scanner loop: decoded frames pass the duplicate-scan guard and get
/// submitted to the resolver. The clock is read per admitted scan, so a
/// kiosk left running for hours stamps each check-in with the scan time,
/// not the process start time. The guard is released after EVERY outcome
/// so a failed submission can never wedge the scanner; retryable failures
/// also re-arm the decoder so the same code can be presented again.
pub fn run_loop<S, C>(
    conn: &rusqlite::Connection,
    member: &str,
    source: S,
    clock: C,
    max_dwell: Duration,
) -> AppResult<()>
where
    S: FrameSource,
    C: Fn() -> DateTime<Local>,
{
    let mut decoder = ScanDecoder::new(source);
    let mut guard = ScanGuard::new();

    while let Some(code) = decoder.next_code()? {
        if !guard.admit(&code) {
            continue;
        }

        let now = clock();
        let outcome = check_in(conn, member, &code, CheckInSource::QrScan, now, max_dwell);

        // Single-flight lock releases on every outcome.
        guard.complete();

        match outcome {
            Ok(CheckIn::Created(r)) => {
                success(format!(
                    "Welcome! Checked in at gym {} ({}).",
                    r.gym_id,
                    r.check_in_str()
                ));
            }
            Ok(CheckIn::AlreadyInGym(r)) => {
                info(format!(
                    "Already checked in since {} — scan the desk terminal to check out.",
                    r.check_in_str()
                ));
            }
            Err(AppError::InvalidCode(c)) => {
                warning(format!("Unrecognized code '{}' — try again.", c));
                guard.reset();
                decoder.reset();
            }
            Err(e) => {
                error(format!("Check-in failed: {} — try again.", e));
                guard.reset();
                decoder.reset();
            }
        }
    }

    Ok(())
}

/// Decoded frames arrive on stdin, one per line. `at` pins the clock for
/// tests; without it every scan reads the wall clock.
pub fn handle(cmd: &Commands, cfg: &Config, at: Option<DateTime<Local>>) -> AppResult<()> {
    if let Commands::Kiosk { member } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        info(format!(
            "Kiosk ready for member {} — one frame per line, Ctrl-D to stop.",
            member
        ));

        let stdin = io::stdin();
        run_loop(
            &pool.conn,
            member,
            LineFrameSource::new(stdin.lock()),
            || at.unwrap_or_else(Local::now),
            cfg.max_dwell(),
        )?;

        info("Kiosk stopped.");
    }

    Ok(())
}
