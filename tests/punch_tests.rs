use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rtimeclock::models::punch_kind::PunchKind;
use rtimeclock::models::status::ClockStatus;

mod common;
use common::{local_ts, rtc, seed_org, setup_test_db};

fn count_punches(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row("SELECT COUNT(*) FROM punches", [], |row| row.get(0))
        .expect("count punches")
}

#[test]
fn test_first_punch_must_be_clock_in() {
    let db_path = setup_test_db("first_punch");
    seed_org(&db_path);

    // No punch yet: everything except 'in' is rejected
    rtc()
        .args(["--db", &db_path, "--test", "punch", "out", "-w", "alice"])
        .assert()
        .failure()
        .stderr(contains("Illegal punch: cannot record 'out' while clocked out"));

    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "punch",
            "break-start",
            "-w",
            "alice",
        ])
        .assert()
        .failure()
        .stderr(contains("cannot record 'break_start' while clocked out"));

    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "punch",
            "break-end",
            "-w",
            "alice",
        ])
        .assert()
        .failure()
        .stderr(contains("cannot record 'break_end' while clocked out"));

    assert_eq!(count_punches(&db_path), 0);

    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "alice"])
        .assert()
        .success()
        .stdout(contains("Clock In recorded for Alice"));

    assert_eq!(count_punches(&db_path), 1);
}

#[test]
fn test_full_day_cycle() {
    let db_path = setup_test_db("full_day_cycle");
    seed_org(&db_path);

    for kind in ["in", "break-start", "break-end", "out"] {
        rtc()
            .args(["--db", &db_path, "--test", "punch", kind, "-w", "alice"])
            .assert()
            .success();
    }

    assert_eq!(count_punches(&db_path), 4);

    rtc()
        .args(["--db", &db_path, "--test", "status", "-w", "alice"])
        .assert()
        .success()
        .stdout(contains("Clocked Out"));
}

#[test]
fn test_double_clock_in_rejected() {
    let db_path = setup_test_db("double_clock_in");
    seed_org(&db_path);

    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "alice"])
        .assert()
        .success();

    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "alice"])
        .assert()
        .failure()
        .stderr(contains("cannot record 'in' while already clocked in"));

    // The rejected attempt must not leave a record behind
    assert_eq!(count_punches(&db_path), 1);
}

#[test]
fn test_break_end_without_break_rejected() {
    let db_path = setup_test_db("break_end_no_break");
    seed_org(&db_path);

    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "alice"])
        .assert()
        .success();

    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "punch",
            "break-end",
            "-w",
            "alice",
        ])
        .assert()
        .failure()
        .stderr(contains("cannot record 'break_end' while already clocked in"));
}

#[test]
fn test_clock_out_while_on_break_rejected() {
    let db_path = setup_test_db("out_on_break");
    seed_org(&db_path);

    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "alice"])
        .assert()
        .success();
    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "punch",
            "break-start",
            "-w",
            "alice",
        ])
        .assert()
        .success();

    rtc()
        .args(["--db", &db_path, "--test", "punch", "out", "-w", "alice"])
        .assert()
        .failure()
        .stderr(contains("cannot record 'out' while on break"));

    // Only in + break-start are stored
    assert_eq!(count_punches(&db_path), 2);
}

#[test]
fn test_clock_in_while_on_break_rejected() {
    let db_path = setup_test_db("in_on_break");
    seed_org(&db_path);

    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "alice"])
        .assert()
        .success();
    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "punch",
            "break-start",
            "-w",
            "alice",
        ])
        .assert()
        .success();

    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "alice"])
        .assert()
        .failure()
        .stderr(contains("cannot record 'in' while on break"));

    // Status is untouched by the rejected attempt
    rtc()
        .args(["--db", &db_path, "--test", "status", "-w", "alice"])
        .assert()
        .success()
        .stdout(contains("On Break"));
}

#[test]
fn test_transition_matrix() {
    use ClockStatus::*;
    use PunchKind::*;

    let legal = [
        (ClockedOut, In),
        (ClockedIn, Out),
        (ClockedIn, BreakStart),
        (OnBreak, BreakEnd),
    ];

    for state in [ClockedOut, ClockedIn, OnBreak] {
        for kind in [In, Out, BreakStart, BreakEnd] {
            let expected = legal.contains(&(state, kind));
            assert_eq!(
                state.allows(kind),
                expected,
                "{:?} -> {:?} should be {}",
                state,
                kind,
                if expected { "legal" } else { "rejected" }
            );
        }
    }
}

#[test]
fn test_punch_comment_and_device_stored() {
    let db_path = setup_test_db("punch_comment_device");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "punch", "in", "-w", "alice", "-c", "door badge broken",
            "--device", "kiosk-3",
        ])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let (comment, device): (String, String) = conn
        .query_row(
            "SELECT comment, device FROM punches WHERE worker_id = 'alice'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("load punch");

    assert_eq!(comment, "door badge broken");
    assert_eq!(device, "kiosk-3");
}

#[test]
fn test_photo_required_when_org_enables_it() {
    let db_path = setup_test_db("photo_required");
    seed_org(&db_path);

    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "org",
            "add",
            "pix",
            "--photo-on-punch",
        ])
        .assert()
        .success();
    rtc()
        .args([
            "--db", &db_path, "--test", "worker", "add", "pete", "--org", "pix",
        ])
        .assert()
        .success();

    // No photo, no explicit fallback: rejected before anything is written
    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "pete"])
        .assert()
        .failure()
        .stderr(contains("Photo capture is required to clock in"));

    assert_eq!(count_punches(&db_path), 0);

    // The explicit fallback records a punch without a photo
    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "punch",
            "in",
            "-w",
            "pete",
            "--no-photo",
        ])
        .assert()
        .success();

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let photo: Option<String> = conn
        .query_row(
            "SELECT photo_url FROM punches WHERE worker_id = 'pete'",
            [],
            |row| row.get(0),
        )
        .expect("load punch");
    assert!(photo.is_none());
}

#[test]
fn test_photo_stored_under_org_and_worker() {
    use rtimeclock::core::capture::{DirPhotoStore, FixedClock, NoLocation};
    use rtimeclock::core::punch::{PunchContext, PunchLogic};
    use rtimeclock::db::pool::DbPool;
    use std::time::Duration;

    let db_path = setup_test_db("photo_stored");
    seed_org(&db_path);

    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "org",
            "add",
            "pix",
            "--photo-on-punch",
        ])
        .assert()
        .success();
    rtc()
        .args([
            "--db", &db_path, "--test", "worker", "add", "pete", "--org", "pix",
        ])
        .assert()
        .success();

    let photo_root = std::env::temp_dir().join("photo_stored_root");
    std::fs::remove_dir_all(&photo_root).ok();

    let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    let mut pool = DbPool::new(&db_path).expect("open db");
    let punch = PunchLogic::record(
        &mut pool,
        "pete",
        PunchKind::In,
        PunchContext {
            comment: None,
            photo: Some(bytes.clone()),
            skip_photo: false,
            device: "test".to_string(),
        },
        &FixedClock(local_ts("2026-03-02", "09:00")),
        &NoLocation,
        Duration::from_secs(0),
        &DirPhotoStore {
            root: photo_root.clone(),
        },
    )
    .expect("record punch");

    let url = punch.photo_url.expect("photo url");
    assert!(url.contains("punch-photos"));
    assert!(url.contains("pix"));
    assert!(url.contains("pete"));
    assert_eq!(std::fs::read(&url).expect("read stored photo"), bytes);
}

#[test]
fn test_location_capture_and_degradation() {
    let db_path = setup_test_db("location_capture");
    seed_org(&db_path);

    rtc()
        .args(["--db", &db_path, "--test", "org", "add", "field", "--gps"])
        .assert()
        .success();
    rtc()
        .args([
            "--db", &db_path, "--test", "worker", "add", "gina", "--org", "field",
        ])
        .assert()
        .success();

    // Explicit coordinates are stored with the punch
    rtc()
        .args([
            "--db", &db_path, "--test", "punch", "in", "-w", "gina", "--lat", "45.4642", "--lng",
            "9.19",
        ])
        .assert()
        .success()
        .stdout(contains("Position: 45.46420,9.19000"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let (lat, lng): (f64, f64) = conn
        .query_row(
            "SELECT latitude, longitude FROM punches WHERE worker_id = 'gina'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("load coordinates");
    assert!((lat - 45.4642).abs() < 1e-9);
    assert!((lng - 9.19).abs() < 1e-9);

    // No position source at all: the punch proceeds, with a warning
    let home = std::env::temp_dir().join("location_capture_home");
    std::fs::create_dir_all(&home).expect("create home");

    rtc()
        .env("HOME", &home)
        .env("APPDATA", &home)
        .args(["--db", &db_path, "--test", "punch", "out", "-w", "gina"])
        .assert()
        .success()
        .stdout(contains("Position unavailable"));
}

#[test]
fn test_punch_rejects_out_of_range_coordinates() {
    let db_path = setup_test_db("bad_coordinates");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "punch", "in", "-w", "alice", "--lat", "123.0", "--lng",
            "9.19",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid coordinate"));
}

#[test]
fn test_punch_for_unknown_worker_rejected() {
    let db_path = setup_test_db("unknown_worker");
    seed_org(&db_path);

    rtc()
        .args(["--db", &db_path, "--test", "punch", "in", "-w", "ghost"])
        .assert()
        .failure()
        .stderr(contains("Unknown worker: ghost"));
}

#[test]
fn test_punch_without_worker_and_no_default() {
    let db_path = setup_test_db("no_default_worker");
    seed_org(&db_path);

    // Point the config dir at an empty home so no default_worker leaks in
    let home = std::env::temp_dir().join("no_default_worker_home");
    std::fs::create_dir_all(&home).expect("create home");

    rtc()
        .env("HOME", &home)
        .env("APPDATA", &home)
        .args(["--db", &db_path, "--test", "punch", "in"])
        .assert()
        .failure()
        .stderr(contains("no worker specified"));
}
