use predicates::str::contains;
use rtimeclock::models::punch_kind::PunchKind;
use std::fs;
use std::path::Path;

mod common;
use common::{local_ts, record_at, rtc, seed_org, setup_test_db, temp_out};

/// One full working day for alice on 2026-03-02.
fn seed_day(db_path: &str) {
    record_at(db_path, "alice", PunchKind::In, local_ts("2026-03-02", "09:00"));
    record_at(db_path, "alice", PunchKind::Out, local_ts("2026-03-02", "17:00"));
}

#[test]
fn test_export_csv() {
    let db_path = setup_test_db("export_csv");
    seed_org(&db_path);
    seed_day(&db_path);

    let out = temp_out("export_csv", "csv");

    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "csv", "--file", &out, "--org", "acme",
        ])
        .assert()
        .success()
        .stdout(contains("Exporting to CSV:"))
        .stdout(contains("CSV export completed:"));

    let content = fs::read_to_string(&out).expect("read export");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("id,worker,name,time,kind,auto,latitude,longitude,photo,device,comment,edits")
    );
    assert_eq!(content.lines().count(), 3); // header + 2 punches
    assert!(content.contains("alice"));
    assert!(content.contains("Clock In"));
    assert!(content.contains("Clock Out"));
}

#[test]
fn test_export_json() {
    let db_path = setup_test_db("export_json");
    seed_org(&db_path);
    seed_day(&db_path);

    let out = temp_out("export_json", "json");

    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "json", "--file", &out, "--org", "acme",
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed:"));

    let content = fs::read_to_string(&out).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("parse export");
    let rows = rows.as_array().expect("array of punches");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["worker"], "alice");
    assert_eq!(rows[0]["name"], "Alice");
    assert_eq!(rows[0]["kind"], "Clock In");
    assert_eq!(rows[0]["auto"], false);
    assert_eq!(rows[0]["edits"], 0);
    assert_eq!(rows[1]["kind"], "Clock Out");
}

#[test]
fn test_export_xlsx() {
    let db_path = setup_test_db("export_xlsx");
    seed_org(&db_path);
    seed_day(&db_path);

    let out = temp_out("export_xlsx", "xlsx");

    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "xlsx", "--file", &out, "--org", "acme",
        ])
        .assert()
        .success()
        .stdout(contains("XLSX export completed:"));

    let meta = fs::metadata(&out).expect("stat export");
    assert!(meta.len() > 0);
}

#[test]
fn test_export_pdf() {
    let db_path = setup_test_db("export_pdf");
    seed_org(&db_path);
    seed_day(&db_path);

    let out = temp_out("export_pdf", "pdf");

    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "pdf", "--file", &out, "--org", "acme",
        ])
        .assert()
        .success()
        .stdout(contains("PDF export completed:"));

    let bytes = fs::read(&out).expect("read export");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    seed_org(&db_path);
    seed_day(&db_path);

    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "csv", "--file", "out.csv", "--org", "acme",
        ])
        .assert()
        .failure()
        .stderr(contains("Output file path must be absolute"));
}

#[test]
fn test_export_empty_selection() {
    let db_path = setup_test_db("export_empty");
    seed_org(&db_path);

    let out = temp_out("export_empty", "csv");

    // Nothing matched: a warning, a clean exit, and no file on disk
    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "csv", "--file", &out, "--org", "acme",
        ])
        .assert()
        .success()
        .stdout(contains("No punches found for the selected period."));

    assert!(!Path::new(&out).exists());
}

#[test]
fn test_export_existing_file_needs_confirmation() {
    let db_path = setup_test_db("export_overwrite");
    seed_org(&db_path);
    seed_day(&db_path);

    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "sentinel").expect("write existing file");

    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "csv", "--file", &out, "--org", "acme",
        ])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(contains("already exists"))
        .stderr(contains("Export cancelled: existing file not overwritten"));

    assert_eq!(fs::read_to_string(&out).expect("read file"), "sentinel");

    // --force skips the prompt and replaces the file
    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "csv", "--file", &out, "--org", "acme", "-f",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed:"));

    let content = fs::read_to_string(&out).expect("read export");
    assert!(content.starts_with("id,worker,name"));
}

#[test]
fn test_export_period_filter() {
    let db_path = setup_test_db("export_period");
    seed_org(&db_path);
    seed_day(&db_path);
    record_at(&db_path, "alice", PunchKind::In, local_ts("2026-04-10", "09:00"));

    let out = temp_out("export_period", "json");

    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "json", "--file", &out, "--org", "acme",
            "--period", "2026-03",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("parse export");
    assert_eq!(rows.as_array().expect("array").len(), 2);
}

#[test]
fn test_export_worker_filter() {
    let db_path = setup_test_db("export_worker");
    seed_org(&db_path);
    seed_day(&db_path);
    record_at(&db_path, "mara", PunchKind::In, local_ts("2026-03-02", "08:00"));

    let out = temp_out("export_worker", "json");

    rtc()
        .args([
            "--db", &db_path, "--test", "export",
            "--format", "json", "--file", &out, "--org", "acme",
            "-w", "alice",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read export");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("parse export");
    let rows = rows.as_array().expect("array");

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["worker"] == "alice"));
}
