#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rtimeclock::core::capture::{DirPhotoStore, FixedClock, NoLocation};
use rtimeclock::core::punch::{PunchContext, PunchLogic};
use rtimeclock::db::pool::DbPool;
use rtimeclock::models::punch::Punch;
use rtimeclock::models::punch_kind::PunchKind;
use rtimeclock::utils::time::local_to_utc;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub fn rtc() -> Command {
    cargo_bin_cmd!("rtimeclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimeclock.sqlite", name));
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

/// Initialize the DB and register the 'acme' org with one employee (alice)
/// and one manager (mara)
pub fn seed_org(db_path: &str) {
    rtc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rtc()
        .args([
            "--db", db_path, "--test", "org", "add", "acme", "--name", "Acme Corp",
        ])
        .assert()
        .success();

    rtc()
        .args([
            "--db", db_path, "--test", "worker", "add", "alice", "--org", "acme", "--name",
            "Alice",
        ])
        .assert()
        .success();

    rtc()
        .args([
            "--db", db_path, "--test", "worker", "add", "mara", "--org", "acme", "--name", "Mara",
            "--role", "manager",
        ])
        .assert()
        .success();
}

/// Resolve a wall time on a date through the local timezone, exactly like
/// the CLI input path does
pub fn local_ts(date: &str, time: &str) -> DateTime<Utc> {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("parse date");
    let t = NaiveTime::parse_from_str(time, "%H:%M").expect("parse time");
    local_to_utc(d.and_time(t)).expect("resolve local time")
}

/// Record a backdated punch through the state machine (library API with a
/// fixed clock, no capture sources)
pub fn record_at(db_path: &str, worker: &str, kind: PunchKind, at: DateTime<Utc>) -> Punch {
    let mut pool = DbPool::new(db_path).expect("open db");
    let ctx = PunchContext {
        comment: None,
        photo: None,
        skip_photo: true,
        device: "test".to_string(),
    };
    PunchLogic::record(
        &mut pool,
        worker,
        kind,
        ctx,
        &FixedClock(at),
        &NoLocation,
        Duration::from_secs(0),
        &DirPhotoStore {
            root: env::temp_dir(),
        },
    )
    .expect("record punch")
}
