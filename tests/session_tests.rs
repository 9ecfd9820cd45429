use chrono::Duration;
use predicates::str::{contains, is_match};
use rtimeclock::core::session::{
    Session, compute_elapsed, format_elapsed_coarse, format_elapsed_compact,
};
use rtimeclock::models::punch::Punch;
use rtimeclock::models::punch_kind::PunchKind;
use rtimeclock::models::status::ClockStatus;

mod common;
use common::{local_ts, record_at, rtc, seed_org, setup_test_db};

#[test]
fn test_elapsed_formatting() {
    assert_eq!(format_elapsed_compact(&Duration::seconds(90)), "00:01:30");
    assert_eq!(format_elapsed_compact(&Duration::seconds(3661)), "01:01:01");
    assert_eq!(format_elapsed_compact(&Duration::seconds(0)), "00:00:00");

    assert_eq!(format_elapsed_coarse(&Duration::seconds(3661)), "01h 01m");
    assert_eq!(format_elapsed_coarse(&Duration::seconds(59)), "00h 00m");
    assert_eq!(format_elapsed_coarse(&Duration::hours(27)), "27h 00m");
}

#[test]
fn test_elapsed_clamped_to_zero() {
    let since = local_ts("2026-03-02", "12:00");
    let earlier = local_ts("2026-03-02", "11:00");

    // A punch recorded after "now" (clock skew) never yields a negative span
    assert_eq!(compute_elapsed(&since, &earlier), Duration::zero());
    assert_eq!(
        format_elapsed_compact(&compute_elapsed(&since, &earlier)),
        "00:00:00"
    );
}

#[test]
fn test_session_derived_from_latest_punch_only() {
    let session = Session::from_latest(None);
    assert_eq!(session.status, ClockStatus::ClockedOut);
    assert!(session.since.is_none());
    assert!(session.last.is_none());

    let at = local_ts("2026-03-02", "09:00");
    let punch_of = |kind: PunchKind| {
        Punch::new("alice", "acme", at, kind, None, None, None, "test")
    };

    let cases = [
        (PunchKind::In, ClockStatus::ClockedIn, true),
        (PunchKind::BreakStart, ClockStatus::OnBreak, true),
        (PunchKind::BreakEnd, ClockStatus::ClockedIn, true),
        (PunchKind::Out, ClockStatus::ClockedOut, false),
    ];

    for (kind, expected, working) in cases {
        let session = Session::from_latest(Some(punch_of(kind)));
        assert_eq!(session.status, expected);
        assert_eq!(session.since.is_some(), working);
        if working {
            assert_eq!(session.since, Some(at));
        }
    }
}

#[test]
fn test_status_shows_since_and_elapsed() {
    let db_path = setup_test_db("status_since");
    seed_org(&db_path);

    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:00"));

    rtc()
        .args(["--db", &db_path, "--test", "status", "-w", "alice"])
        .assert()
        .success()
        .stdout(contains("Alice"))
        .stdout(contains("Clocked In"))
        .stdout(contains("since"))
        .stdout(contains("elapsed)"));
}

#[test]
fn test_status_without_punches() {
    let db_path = setup_test_db("status_empty");
    seed_org(&db_path);

    rtc()
        .args(["--db", &db_path, "--test", "status", "-w", "alice"])
        .assert()
        .success()
        .stdout(contains("Clocked Out"))
        .stdout(contains("no punches recorded yet"));
}

#[test]
fn test_status_on_break() {
    let db_path = setup_test_db("status_break");
    seed_org(&db_path);

    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:00"));
    record_at(
        &db_path,
        "alice",
        PunchKind::BreakStart,
        local_ts("2026-03-02", "12:30"),
    );

    rtc()
        .args(["--db", &db_path, "--test", "status", "-w", "alice"])
        .assert()
        .success()
        .stdout(contains("On Break"));
}

#[test]
fn test_status_coarse_elapsed() {
    let db_path = setup_test_db("status_coarse");
    seed_org(&db_path);

    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:00"));

    rtc()
        .args(["--db", &db_path, "--test", "status", "-w", "alice", "--coarse"])
        .assert()
        .success()
        .stdout(is_match(r"\d+h \d{2}m").expect("valid regex"));
}

#[test]
fn test_status_marks_auto_clock_out() {
    let db_path = setup_test_db("status_auto_out");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "org", "set", "acme", "--auto-out", "18:00",
        ])
        .assert()
        .success();

    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:00"));

    rtc()
        .args([
            "--db",
            &db_path,
            "--test",
            "sweep",
            "--org",
            "acme",
            "--date",
            "2026-03-02",
        ])
        .assert()
        .success();

    rtc()
        .args(["--db", &db_path, "--test", "status", "-w", "alice"])
        .assert()
        .success()
        .stdout(contains("Clocked Out"))
        .stdout(contains("recorded by the auto clock-out sweep"));
}

#[test]
fn test_team_overview() {
    let db_path = setup_test_db("team_overview");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "worker", "add", "bob", "--org", "acme",
        ])
        .assert()
        .success();

    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:00"));
    record_at(&db_path, "bob", PunchKind::In, local_ts("2026-03-02", "08:30"));
    record_at(
        &db_path,
        "bob",
        PunchKind::BreakStart,
        local_ts("2026-03-02", "12:00"),
    );

    // mara has no punches and counts as clocked out
    rtc()
        .args(["--db", &db_path, "--test", "status", "--team", "--org", "acme"])
        .assert()
        .success()
        .stdout(contains("Worker"))
        .stdout(contains("alice"))
        .stdout(contains("bob"))
        .stdout(contains("mara"))
        .stdout(contains("On Break"))
        .stdout(contains("3 worker(s), 2 currently working"));
}
