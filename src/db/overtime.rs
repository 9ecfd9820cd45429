use crate::errors::{AppError, AppResult};
use crate::models::overtime::{OvertimeRequest, OvertimeStatus};
use crate::utils::time::{fmt_utc_ts, parse_utc_ts};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<OvertimeRequest> {
    let request_date_str: String = row.get("request_date")?;
    let request_date = parse_utc_ts(&request_date_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let date_str: String = row.get("overtime_date")?;
    let overtime_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;
    let start_time = parse_hhmm(&start_str)?;
    let end_time = parse_hhmm(&end_str)?;

    let status_str: String = row.get("status")?;
    let status = OvertimeStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Other(format!(
                "Invalid overtime status: {}",
                status_str
            ))),
        )
    })?;

    let approved_at: Option<DateTime<Utc>> = match row.get::<_, Option<String>>("approved_at")? {
        Some(s) => Some(parse_utc_ts(&s).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?),
        None => None,
    };

    Ok(OvertimeRequest {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        org_id: row.get("org_id")?,
        request_date,
        overtime_date,
        start_time,
        end_time,
        duration_hours: row.get("duration_hours")?,
        reason: row.get("reason")?,
        status,
        approver_id: row.get("approver_id")?,
        approver_name: row.get("approver_name")?,
        approved_at,
    })
}

fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(s.to_string())),
        )
    })
}

/// Insert a request and return its assigned id.
pub fn insert_request(conn: &Connection, req: &OvertimeRequest) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO overtime_requests (worker_id, org_id, request_date, overtime_date,
                                        start_time, end_time, duration_hours, reason, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            req.worker_id,
            req.org_id,
            fmt_utc_ts(&req.request_date),
            req.overtime_date.format("%Y-%m-%d").to_string(),
            req.start_time.format("%H:%M").to_string(),
            req.end_time.format("%H:%M").to_string(),
            req.duration_hours,
            req.reason,
            req.status.to_db_str(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn load_request(conn: &Connection, id: i64) -> AppResult<OvertimeRequest> {
    let mut stmt = conn.prepare("SELECT * FROM overtime_requests WHERE id = ?1")?;

    stmt.query_row([id], map_row)
        .optional()?
        .ok_or(AppError::OvertimeNotFound(id))
}

/// All requests of one worker, newest first.
pub fn load_requests_for_worker(
    conn: &Connection,
    org_id: &str,
    worker_id: &str,
) -> AppResult<Vec<OvertimeRequest>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM overtime_requests
         WHERE org_id = ?1 AND worker_id = ?2
         ORDER BY request_date DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![org_id, worker_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All requests of an organization, newest first.
pub fn load_requests_for_org(conn: &Connection, org_id: &str) -> AppResult<Vec<OvertimeRequest>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM overtime_requests
         WHERE org_id = ?1
         ORDER BY request_date DESC, id DESC",
    )?;

    let rows = stmt.query_map([org_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Conditional terminal transition: only fires while the row is still
/// pending, which makes resolution exactly-once even under a race.
/// Returns the number of rows changed (0 = already resolved or missing).
pub fn resolve_request(
    conn: &Connection,
    id: i64,
    decision: OvertimeStatus,
    approver_id: &str,
    approver_name: &str,
    approved_at: &DateTime<Utc>,
) -> AppResult<usize> {
    let changed = conn.execute(
        "UPDATE overtime_requests
         SET status = ?1, approver_id = ?2, approver_name = ?3, approved_at = ?4
         WHERE id = ?5 AND status = 'pending'",
        params![
            decision.to_db_str(),
            approver_id,
            approver_name,
            fmt_utc_ts(approved_at),
            id,
        ],
    )?;

    Ok(changed)
}
