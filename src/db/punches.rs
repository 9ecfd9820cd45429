use crate::errors::{AppError, AppResult};
use crate::models::audit::AuditEntry;
use crate::models::geo::GeoPoint;
use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use crate::utils::time::{fmt_utc_ts, parse_utc_ts};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Punch> {
    let ts_str: String = row.get("punch_time")?;
    let punch_time = parse_utc_ts(&ts_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = PunchKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidPunchKind(kind_str.clone())),
        )
    })?;

    let trail_str: String = row.get("audit_trail")?;
    let audit_trail: Vec<AuditEntry> = serde_json::from_str(&trail_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!("Invalid audit trail: {}", e))),
        )
    })?;

    let latitude: Option<f64> = row.get("latitude")?;
    let longitude: Option<f64> = row.get("longitude")?;
    let location = match (latitude, longitude) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };

    Ok(Punch {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        org_id: row.get("org_id")?,
        punch_time,
        kind,
        auto_clock_out: row.get::<_, i64>("auto_clock_out")? == 1,
        comment: row.get("comment")?,
        location,
        photo_url: row.get("photo_url")?,
        device: row.get("device")?,
        audit_trail,
        created_at: row.get("created_at")?,
    })
}

/// Insert a punch and return its assigned id.
pub fn insert_punch(conn: &Connection, punch: &Punch) -> AppResult<i64> {
    let trail = serde_json::to_string(&punch.audit_trail)
        .map_err(|e| AppError::Other(format!("Audit trail serialization failed: {}", e)))?;

    conn.execute(
        "INSERT INTO punches (worker_id, org_id, punch_time, kind, auto_clock_out,
                              comment, latitude, longitude, photo_url, device,
                              audit_trail, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            punch.worker_id,
            punch.org_id,
            fmt_utc_ts(&punch.punch_time),
            punch.kind.to_db_str(),
            if punch.auto_clock_out { 1 } else { 0 },
            punch.comment,
            punch.location.map(|g| g.latitude),
            punch.location.map(|g| g.longitude),
            punch.photo_url,
            punch.device,
            trail,
            punch.created_at,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// The single most-recent punch for a worker, or None for a fresh ledger.
/// Current-state derivation reads exactly this one record.
pub fn latest_punch(conn: &Connection, org_id: &str, worker_id: &str) -> AppResult<Option<Punch>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches
         WHERE org_id = ?1 AND worker_id = ?2
         ORDER BY punch_time DESC, id DESC
         LIMIT 1",
    )?;

    let punch = stmt
        .query_row(params![org_id, worker_id], map_row)
        .optional()?;

    Ok(punch)
}

pub fn load_punch(conn: &Connection, id: i64) -> AppResult<Punch> {
    let mut stmt = conn.prepare("SELECT * FROM punches WHERE id = ?1")?;

    stmt.query_row([id], map_row)
        .optional()?
        .ok_or(AppError::PunchNotFound(id))
}

/// Punches for one worker inside a UTC half-open window [start, end),
/// oldest first.
pub fn load_punches_in_span(
    conn: &Connection,
    org_id: &str,
    worker_id: &str,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> AppResult<Vec<Punch>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches
         WHERE org_id = ?1 AND worker_id = ?2
           AND punch_time >= ?3 AND punch_time < ?4
         ORDER BY punch_time ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![org_id, worker_id, fmt_utc_ts(start), fmt_utc_ts(end)],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All punches of an organization inside a UTC half-open window [start, end),
/// oldest first. Feeds the export writers.
pub fn load_org_punches_in_span(
    conn: &Connection,
    org_id: &str,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> AppResult<Vec<Punch>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches
         WHERE org_id = ?1 AND punch_time >= ?2 AND punch_time < ?3
         ORDER BY punch_time ASC, id ASC",
    )?;

    let rows = stmt.query_map(params![org_id, fmt_utc_ts(start), fmt_utc_ts(end)], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every punch of an organization, oldest first.
pub fn load_all_org_punches(conn: &Connection, org_id: &str) -> AppResult<Vec<Punch>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches
         WHERE org_id = ?1
         ORDER BY punch_time ASC, id ASC",
    )?;

    let rows = stmt.query_map([org_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// The most recent `limit` punches for a worker, newest first.
pub fn load_recent_punches(
    conn: &Connection,
    org_id: &str,
    worker_id: &str,
    limit: usize,
) -> AppResult<Vec<Punch>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches
         WHERE org_id = ?1 AND worker_id = ?2
         ORDER BY punch_time DESC, id DESC
         LIMIT ?3",
    )?;

    let rows = stmt.query_map(params![org_id, worker_id, limit as i64], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Apply an audited time correction: rewrite `punch_time` and replace the
/// stored trail with the extended one in a single statement, so the history
/// append and the timestamp change land together.
pub fn apply_time_edit(
    conn: &Connection,
    id: i64,
    new_time: &DateTime<Utc>,
    trail: &[AuditEntry],
) -> AppResult<()> {
    let trail_json = serde_json::to_string(trail)
        .map_err(|e| AppError::Other(format!("Audit trail serialization failed: {}", e)))?;

    let changed = conn.execute(
        "UPDATE punches SET punch_time = ?1, audit_trail = ?2 WHERE id = ?3",
        params![fmt_utc_ts(new_time), trail_json, id],
    )?;

    if changed == 0 {
        return Err(AppError::PunchNotFound(id));
    }
    Ok(())
}
