use predicates::str::contains;
use rtimeclock::models::audit::AuditEntry;
use rtimeclock::models::punch_kind::PunchKind;
use rtimeclock::utils::time::fmt_utc_ts;
use rusqlite::Connection;

mod common;
use common::{local_ts, record_at, rtc, seed_org, setup_test_db};

fn punch_row(db_path: &str, id: i64) -> (String, Vec<AuditEntry>) {
    let conn = Connection::open(db_path).expect("open database");
    let (time, trail_json): (String, String) = conn
        .query_row(
            "SELECT punch_time, audit_trail FROM punches WHERE id = ?1",
            [id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .expect("load punch");
    let trail: Vec<AuditEntry> = serde_json::from_str(&trail_json).expect("parse audit trail");
    (time, trail)
}

#[test]
fn test_edit_corrects_punch_time() {
    let db_path = setup_test_db("edit_basic");
    seed_org(&db_path);

    let original = local_ts("2026-03-02", "09:12");
    record_at(&db_path, "alice", PunchKind::In, original);

    rtc()
        .args([
            "--db", &db_path, "--test", "edit", "1",
            "--time", "2026-03-02 08:45",
            "--reason", "forgot badge",
            "--editor", "mara",
        ])
        .assert()
        .success()
        .stdout(contains("Punch 1 corrected to"))
        .stdout(contains("(edit #1)"));

    let (time, trail) = punch_row(&db_path, 1);
    assert_eq!(time, fmt_utc_ts(&local_ts("2026-03-02", "08:45")));

    // The replaced value is preserved in the trail, never overwritten
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].editor_id, "mara");
    assert_eq!(trail[0].editor_name, "Mara");
    assert_eq!(trail[0].change_reason, "forgot badge");
    assert_eq!(trail[0].previous_punch_time, original);

    // The status view surfaces the correction count
    rtc()
        .args(["--db", &db_path, "--test", "status", "-w", "alice"])
        .assert()
        .success()
        .stdout(contains("time corrected 1 time(s)"));
}

#[test]
fn test_second_edit_appends_to_trail() {
    let db_path = setup_test_db("edit_chain");
    seed_org(&db_path);

    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:12"));

    rtc()
        .args([
            "--db", &db_path, "--test", "edit", "1",
            "--time", "2026-03-02 08:45",
            "--reason", "forgot badge",
            "--editor", "mara",
        ])
        .assert()
        .success();

    rtc()
        .args([
            "--db", &db_path, "--test", "edit", "1",
            "--time", "2026-03-02 08:30",
            "--reason", "badge reader clock was off",
            "--editor", "mara",
        ])
        .assert()
        .success()
        .stdout(contains("(edit #2)"));

    let (time, trail) = punch_row(&db_path, 1);
    assert_eq!(time, fmt_utc_ts(&local_ts("2026-03-02", "08:30")));

    // Each correction preserves the value it replaced, oldest first
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].previous_punch_time, local_ts("2026-03-02", "09:12"));
    assert_eq!(trail[1].previous_punch_time, local_ts("2026-03-02", "08:45"));
}

#[test]
fn test_edit_requires_manager_role() {
    let db_path = setup_test_db("edit_role");
    seed_org(&db_path);

    let original = local_ts("2026-03-02", "09:12");
    record_at(&db_path, "alice", PunchKind::In, original);

    rtc()
        .args([
            "--db", &db_path, "--test", "edit", "1",
            "--time", "2026-03-02 08:45",
            "--reason", "self-service",
            "--editor", "alice",
        ])
        .assert()
        .failure()
        .stderr(contains(
            "'alice' is not authorized for this operation (requires manager or admin role)",
        ));

    let (time, trail) = punch_row(&db_path, 1);
    assert_eq!(time, fmt_utc_ts(&original));
    assert!(trail.is_empty());
}

#[test]
fn test_edit_requires_same_organization() {
    let db_path = setup_test_db("edit_cross_org");
    seed_org(&db_path);

    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:12"));

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
            "--db", &db_path, "--test", "edit", "1",
            "--time", "2026-03-02 08:45",
            "--reason", "cleanup",
            "--editor", "boss",
        ])
        .assert()
        .failure()
        .stderr(contains("Worker 'boss' does not belong to organization 'acme'"));

    let (_, trail) = punch_row(&db_path, 1);
    assert!(trail.is_empty());
}

#[test]
fn test_edit_unknown_punch() {
    let db_path = setup_test_db("edit_missing");
    seed_org(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "edit", "99",
            "--time", "2026-03-02 08:45",
            "--reason", "cleanup",
            "--editor", "mara",
        ])
        .assert()
        .failure()
        .stderr(contains("No punch found with id 99"));
}

#[test]
fn test_edit_rejects_bad_timestamp() {
    let db_path = setup_test_db("edit_bad_time");
    seed_org(&db_path);

    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:12"));

    rtc()
        .args([
            "--db", &db_path, "--test", "edit", "1",
            "--time", "yesterdayish",
            "--reason", "cleanup",
            "--editor", "mara",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid timestamp: yesterdayish"));
}
