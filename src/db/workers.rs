use crate::errors::{AppError, AppResult};
use crate::models::worker::{PunchSettings, Role, Worker};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Worker> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    Ok(Worker {
        id: row.get("id")?,
        org_id: row.get("org_id")?,
        display_name: row.get("display_name")?,
        role,
        settings: PunchSettings {
            allow_mobile: row.get::<_, i64>("allow_mobile")? == 1,
            track_gps: row.get::<_, i64>("track_gps")? == 1,
            exempt_from_auto_clock_out: row.get::<_, i64>("exempt_auto_clock_out")? == 1,
        },
        created_at: row.get("created_at")?,
    })
}

pub fn insert_worker(conn: &Connection, worker: &Worker) -> AppResult<()> {
    conn.execute(
        "INSERT INTO workers (id, org_id, display_name, role, allow_mobile,
                              track_gps, exempt_auto_clock_out, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            worker.id,
            worker.org_id,
            worker.display_name,
            worker.role.to_db_str(),
            if worker.settings.allow_mobile { 1 } else { 0 },
            if worker.settings.track_gps { 1 } else { 0 },
            if worker.settings.exempt_from_auto_clock_out {
                1
            } else {
                0
            },
            worker.created_at,
        ],
    )?;
    Ok(())
}

pub fn load_worker(conn: &Connection, id: &str) -> AppResult<Worker> {
    let mut stmt = conn.prepare("SELECT * FROM workers WHERE id = ?1")?;

    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::WorkerNotFound(id.to_string()))
}

/// Every worker of an organization, ordered by id for stable listings.
pub fn load_workers_for_org(conn: &Connection, org_id: &str) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare("SELECT * FROM workers WHERE org_id = ?1 ORDER BY id ASC")?;

    let rows = stmt.query_map([org_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Update a worker (all fields except id).
pub fn update_worker(conn: &Connection, worker: &Worker) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE workers
         SET org_id = ?1, display_name = ?2, role = ?3,
             allow_mobile = ?4, track_gps = ?5, exempt_auto_clock_out = ?6
         WHERE id = ?7",
        params![
            worker.org_id,
            worker.display_name,
            worker.role.to_db_str(),
            if worker.settings.allow_mobile { 1 } else { 0 },
            if worker.settings.track_gps { 1 } else { 0 },
            if worker.settings.exempt_from_auto_clock_out {
                1
            } else {
                0
            },
            worker.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::WorkerNotFound(worker.id.clone()));
    }
    Ok(())
}
