use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Check whether a migration version was already marked in the log table.
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Create the `organizations` table with the modern schema.
fn create_organizations_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS organizations (
            id                  TEXT PRIMARY KEY,
            name                TEXT NOT NULL,
            photo_on_punch      INTEGER NOT NULL DEFAULT 0,
            gps_tracking        INTEGER NOT NULL DEFAULT 0,
            auto_clock_out      INTEGER NOT NULL DEFAULT 0,
            auto_clock_out_time TEXT,
            created_at          TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `workers` table with the modern schema.
fn create_workers_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id                    TEXT PRIMARY KEY,
            org_id                TEXT NOT NULL,
            display_name          TEXT NOT NULL,
            role                  TEXT NOT NULL DEFAULT 'employee'
                                  CHECK(role IN ('employee','manager','admin','super_admin')),
            allow_mobile          INTEGER NOT NULL DEFAULT 0,
            track_gps             INTEGER NOT NULL DEFAULT 1,
            exempt_auto_clock_out INTEGER NOT NULL DEFAULT 0,
            created_at            TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_workers_org ON workers(org_id);
        "#,
    )?;
    Ok(())
}

/// Create the `punches` table with the modern schema (device + audit trail).
fn create_punches_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS punches (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id      TEXT NOT NULL,
            org_id         TEXT NOT NULL,
            punch_time     TEXT NOT NULL,
            kind           TEXT NOT NULL CHECK(kind IN ('in','out','break_start','break_end')),
            auto_clock_out INTEGER NOT NULL DEFAULT 0,
            comment        TEXT,
            latitude       REAL,
            longitude      REAL,
            photo_url      TEXT,
            device         TEXT NOT NULL DEFAULT 'cli',
            audit_trail    TEXT NOT NULL DEFAULT '[]',
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_punches_worker_time
            ON punches(org_id, worker_id, punch_time DESC);
        CREATE INDEX IF NOT EXISTS idx_punches_org_time
            ON punches(org_id, punch_time);
        "#,
    )?;
    Ok(())
}

/// Create the `overtime_requests` table with the modern schema.
fn create_overtime_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS overtime_requests (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id      TEXT NOT NULL,
            org_id         TEXT NOT NULL,
            request_date   TEXT NOT NULL,
            overtime_date  TEXT NOT NULL,
            start_time     TEXT NOT NULL,
            end_time       TEXT NOT NULL,
            duration_hours REAL NOT NULL,
            reason         TEXT NOT NULL,
            status         TEXT NOT NULL DEFAULT 'pending'
                           CHECK(status IN ('pending','approved','rejected')),
            approver_id    TEXT,
            approver_name  TEXT,
            approved_at    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_overtime_worker
            ON overtime_requests(org_id, worker_id, status);
        "#,
    )?;
    Ok(())
}

/// 0.2: punches written before the audited-edit path existed have no
/// `audit_trail` column. Add it with an empty-history default.
fn migrate_add_audit_trail_column(conn: &Connection) -> Result<(), Error> {
    let version = "20260120_0002_add_audit_trail";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !has_column(conn, "punches", "audit_trail")? {
        warning("Adding 'audit_trail' column to punches table...");

        conn.execute(
            "ALTER TABLE punches ADD COLUMN audit_trail TEXT NOT NULL DEFAULT '[]';",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'audit_trail' column: {}", e)),
            )
        })?;

        success(format!(
            "Migration applied: {} → added 'audit_trail' to punches table",
            version
        ));
    }

    mark_migration_applied(conn, version, "Added audit_trail history to punches")?;
    Ok(())
}

/// 0.3: punches now record the originating surface (CLI, kiosk, sweep).
fn migrate_add_device_column(conn: &Connection) -> Result<(), Error> {
    let version = "20260312_0003_add_device";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !has_column(conn, "punches", "device")? {
        warning("Adding 'device' column to punches table...");

        conn.execute(
            "ALTER TABLE punches ADD COLUMN device TEXT NOT NULL DEFAULT 'cli';",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'device' column: {}", e)),
            )
        })?;

        success(format!(
            "Migration applied: {} → added 'device' to punches table",
            version
        ));
    }

    mark_migration_applied(conn, version, "Added originating device to punches")?;
    Ok(())
}

fn backup_before_migration(db_path: &str) -> Result<()> {
    use chrono::Local;
    use std::fs::{self, File};
    use std::io::Write;
    use zip::CompressionMethod;
    use zip::ZipWriter;
    use zip::write::FileOptions;

    let backup_name = format!(
        "{}-backup_db_pre_migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = match std::path::Path::new(db_path).parent() {
        Some(dir) => dir.join(&backup_name),
        None => std::path::PathBuf::from(&backup_name),
    };

    let file = File::create(&backup_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::new(
            e.kind(),
            format!("Backup failed (create): {}", e),
        )))
    })?;

    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (start_file): {}",
            e
        ))))
    })?;

    let db_content = fs::read(db_path).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (read): {}",
            e
        ))))
    })?;

    zip.write_all(&db_content).map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (write_all): {}",
            e
        ))))
    })?;

    zip.finish().map_err(|e| {
        Error::ToSqlConversionFailure(Box::new(std::io::Error::other(format!(
            "Backup failed (finish): {}",
            e
        ))))
    })?;

    success(format!("📦 Backup created: {}", backup_path.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from db::initialize::init_db() and `rtimeclock db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Detect a pre-0.2 schema (punches without edit history)
    let punches_exists = table_exists(conn, "punches")?;
    let is_legacy_schema = punches_exists && !has_column(conn, "punches", "audit_trail")?;

    // 3) If legacy → perform PRE-MIGRATION BACKUP
    if is_legacy_schema {
        warning("Legacy schema detected, creating safety backup before migration...");

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if !db_path.is_empty() {
            backup_before_migration(&db_path)?;
        } else {
            warning("Could not determine DB path, backup skipped.");
        }
    }

    // 4) Create missing tables (fresh DBs get the modern schema directly)
    create_organizations_table(conn)?;
    create_workers_table(conn)?;
    create_punches_table(conn)?;
    create_overtime_table(conn)?;

    // 5) Column migrations for DBs created before 0.3
    migrate_add_audit_trail_column(conn)?;
    migrate_add_device_column(conn)?;

    // 6) Config file migrations (marked in the same log table)
    crate::config::migrate::migrate_add_device_label(conn)?;

    Ok(())
}
