use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rusqlite::Connection;

mod common;
use common::{rtc, seed_org, setup_test_db};

/// Files a request through the CLI and asserts it succeeded.
fn file_request(db_path: &str, worker: &str, date: &str, start: &str, end: &str, hours: &str) {
    rtc()
        .args([
            "--db", db_path, "--test", "overtime", "file", "-w", worker, "--date", date,
            "--start", start, "--end", end, "--hours", hours, "--reason", "release deadline",
        ])
        .assert()
        .success();
}

fn count_requests(db_path: &str) -> i64 {
    let conn = Connection::open(db_path).expect("open database");
    conn.query_row("SELECT COUNT(*) FROM overtime_requests", [], |r| r.get(0))
        .expect("count requests")
}

fn request_status(db_path: &str, id: i64) -> String {
    let conn = Connection::open(db_path).expect("open database");
    conn.query_row(
        "SELECT status FROM overtime_requests WHERE id = ?1",
        [id],
        |r| r.get(0),
    )
    .expect("load status")
}

#[test]
fn test_file_overtime_request() {
    let db_path = setup_test_db("ot_file");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "file", "-w", "alice",
            "--date", "2026-03-02", "--start", "18:00", "--end", "20:00",
            "--hours", "2.0", "--reason", "release deadline",
        ])
        .assert()
        .success()
        .stdout(contains("Overtime request #1 filed: 2.00 h on 2026-03-02."));

    // New requests always start pending, with no approver recorded
    let conn = Connection::open(&db_path).expect("open database");
    let (status, approver): (String, Option<String>) = conn
        .query_row(
            "SELECT status, approver_id FROM overtime_requests WHERE id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .expect("load request");
    assert_eq!(status, "pending");
    assert!(approver.is_none());
}

#[test]
fn test_file_rejects_inverted_window() {
    let db_path = setup_test_db("ot_inverted");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "file", "-w", "alice",
            "--date", "2026-03-02", "--start", "20:00", "--end", "18:00",
            "--hours", "2.0", "--reason", "release deadline",
        ])
        .assert()
        .failure()
        .stderr(contains("End time must be later than start time."));

    // A zero-length window is rejected the same way
    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "file", "-w", "alice",
            "--date", "2026-03-02", "--start", "18:00", "--end", "18:00",
            "--hours", "2.0", "--reason", "release deadline",
        ])
        .assert()
        .failure()
        .stderr(contains("End time must be later than start time."));

    assert_eq!(count_requests(&db_path), 0);
}

#[test]
fn test_file_rejects_nonpositive_hours() {
    let db_path = setup_test_db("ot_zero_hours");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "file", "-w", "alice",
            "--date", "2026-03-02", "--start", "18:00", "--end", "20:00",
            "--hours", "0", "--reason", "release deadline",
        ])
        .assert()
        .failure()
        .stderr(contains("Requested hours must be positive."));

    assert_eq!(count_requests(&db_path), 0);
}

#[test]
fn test_approve_request() {
    let db_path = setup_test_db("ot_approve");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--approve", "--approver", "mara",
        ])
        .assert()
        .success()
        .stdout(contains("Overtime request #1 approved by Mara."));

    let conn = Connection::open(&db_path).expect("open database");
    let (status, approver_id, approved_at): (String, Option<String>, Option<String>) = conn
        .query_row(
            "SELECT status, approver_id, approved_at FROM overtime_requests WHERE id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .expect("load request");
    assert_eq!(status, "approved");
    assert_eq!(approver_id.as_deref(), Some("mara"));
    assert!(approved_at.is_some());
}

#[test]
fn test_reject_request() {
    let db_path = setup_test_db("ot_reject");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--reject", "--approver", "mara",
        ])
        .assert()
        .success()
        .stdout(contains("Overtime request #1 rejected by Mara."));

    assert_eq!(request_status(&db_path, 1), "rejected");
}

#[test]
fn test_resolve_is_exactly_once() {
    let db_path = setup_test_db("ot_once");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--approve", "--approver", "mara",
        ])
        .assert()
        .success();

    // A second approval and a late rejection both fail without touching the row
    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--approve", "--approver", "mara",
        ])
        .assert()
        .failure()
        .stderr(contains("Overtime request 1 was already resolved as 'approved'"));

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--reject", "--approver", "mara",
        ])
        .assert()
        .failure()
        .stderr(contains("already resolved as 'approved'"));

    assert_eq!(request_status(&db_path, 1), "approved");
}

#[test]
fn test_resolve_requires_manager_role() {
    let db_path = setup_test_db("ot_role");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--approve", "--approver", "alice",
        ])
        .assert()
        .failure()
        .stderr(contains(
            "'alice' is not authorized for this operation (requires manager or admin role)",
        ));

    assert_eq!(request_status(&db_path, 1), "pending");
}

#[test]
fn test_resolve_requires_same_organization() {
    let db_path = setup_test_db("ot_cross_org");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");

    rtc()
        .args(["--db", &db_path, "--test", "org", "add", "beta"])
        .assert()
        .success();
    rtc()
        .args([
            "--db", &db_path, "--test", "worker", "add", "boss",
            "--org", "beta", "--role", "manager",
        ])
        .assert()
        .success();

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--approve", "--approver", "boss",
        ])
        .assert()
        .failure()
        .stderr(contains("Worker 'boss' does not belong to organization 'acme'"));

    assert_eq!(request_status(&db_path, 1), "pending");
}

#[test]
fn test_resolve_unknown_request() {
    let db_path = setup_test_db("ot_missing");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "99",
            "--approve", "--approver", "mara",
        ])
        .assert()
        .failure()
        .stderr(contains("No overtime request found with id 99"));
}

#[test]
fn test_resolve_needs_exactly_one_decision() {
    let db_path = setup_test_db("ot_no_decision");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--approver", "mara",
        ])
        .assert()
        .failure()
        .stderr(contains("pass exactly one of --approve or --reject"));
}

#[test]
fn test_list_requests() {
    let db_path = setup_test_db("ot_list");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");
    file_request(&db_path, "mara", "2026-03-03", "17:30", "19:30", "2.0");

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--approve", "--approver", "mara",
        ])
        .assert()
        .success();

    rtc()
        .args(["--db", &db_path, "--test", "overtime", "list", "--org", "acme"])
        .assert()
        .success()
        .stdout(contains("Worker"))
        .stdout(contains("alice"))
        .stdout(contains("mara"))
        .stdout(contains("18:00-20:00"))
        .stdout(contains("Approved"))
        .stdout(contains("Pending"));

    // The status filter keeps only matching rows
    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "list", "--org", "acme",
            "--status", "approved",
        ])
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("18:00-20:00").and(contains("17:30-19:30").not()));

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "list", "--org", "acme",
            "--status", "weird",
        ])
        .assert()
        .failure()
        .stderr(contains(
            "Invalid overtime status 'weird' (expected pending, approved or rejected)",
        ));
}

#[test]
fn test_list_flags_window_drift() {
    let db_path = setup_test_db("ot_drift");
    seed_org(&db_path);

    // Claimed 3.50 h against a 2-hour window: the listing flags the row
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "3.5");

    rtc()
        .args(["--db", &db_path, "--test", "overtime", "list", "--org", "acme"])
        .assert()
        .success()
        .stdout(contains("3.50 h *"))
        .stdout(contains("* claimed hours differ from the start/end window"));
}

#[test]
fn test_list_without_drift_has_no_footnote() {
    let db_path = setup_test_db("ot_no_drift");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");

    rtc()
        .args(["--db", &db_path, "--test", "overtime", "list", "--org", "acme"])
        .assert()
        .success()
        .stdout(contains("2.00 h"))
        .stdout(contains("claimed hours differ").not());
}

#[test]
fn test_list_empty() {
    let db_path = setup_test_db("ot_list_empty");
    seed_org(&db_path);

    rtc()
        .args(["--db", &db_path, "--test", "overtime", "list", "--org", "acme"])
        .assert()
        .success()
        .stdout(contains("No overtime requests found."));
}

#[test]
fn test_stats() {
    let db_path = setup_test_db("ot_stats");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");
    file_request(&db_path, "alice", "2026-03-03", "18:00", "22:00", "4.0");
    file_request(&db_path, "mara", "2026-03-04", "17:00", "20:00", "3.0");

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "1",
            "--approve", "--approver", "mara",
        ])
        .assert()
        .success();
    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "resolve", "2",
            "--reject", "--approver", "mara",
        ])
        .assert()
        .success();

    rtc()
        .args(["--db", &db_path, "--test", "overtime", "stats", "--org", "acme"])
        .assert()
        .success()
        .stdout(contains("Overtime statistics"))
        .stdout(contains("Requests:       3"))
        .stdout(contains("By status:      1 pending, 1 approved, 1 rejected"))
        .stdout(contains("Approved hours: 2.00 h"))
        .stdout(contains("Average ask:    3.00 h"));
}

#[test]
fn test_stats_for_single_worker() {
    let db_path = setup_test_db("ot_stats_worker");
    seed_org(&db_path);
    file_request(&db_path, "alice", "2026-03-02", "18:00", "20:00", "2.0");
    file_request(&db_path, "mara", "2026-03-03", "18:00", "21:00", "3.0");

    rtc()
        .args([
            "--db", &db_path, "--test", "overtime", "stats",
            "-w", "alice", "--org", "acme",
        ])
        .assert()
        .success()
        .stdout(contains("Requests:       1"))
        .stdout(contains("Average ask:    2.00 h"));
}
