use crate::errors::{AppError, AppResult};
use crate::models::organization::{AutoClockOutPolicy, Organization};
use crate::utils::time::parse_time;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Organization> {
    let cutoff_str: Option<String> = row.get("auto_clock_out_time")?;
    let time = match cutoff_str {
        Some(s) => Some(parse_time(&s).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidTime(s.clone())),
            )
        })?),
        None => None,
    };

    Ok(Organization {
        id: row.get("id")?,
        name: row.get("name")?,
        photo_on_punch: row.get::<_, i64>("photo_on_punch")? == 1,
        gps_tracking: row.get::<_, i64>("gps_tracking")? == 1,
        auto_clock_out: AutoClockOutPolicy {
            enabled: row.get::<_, i64>("auto_clock_out")? == 1,
            time,
        },
        created_at: row.get("created_at")?,
    })
}

pub fn insert_org(conn: &Connection, org: &Organization) -> AppResult<()> {
    conn.execute(
        "INSERT INTO organizations (id, name, photo_on_punch, gps_tracking,
                                    auto_clock_out, auto_clock_out_time, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            org.id,
            org.name,
            if org.photo_on_punch { 1 } else { 0 },
            if org.gps_tracking { 1 } else { 0 },
            if org.auto_clock_out.enabled { 1 } else { 0 },
            org.auto_clock_out
                .time
                .map(|t| t.format("%H:%M").to_string()),
            org.created_at,
        ],
    )?;
    Ok(())
}

pub fn load_org(conn: &Connection, id: &str) -> AppResult<Organization> {
    let mut stmt = conn.prepare("SELECT * FROM organizations WHERE id = ?1")?;

    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::OrganizationNotFound(id.to_string()))
}

pub fn list_orgs(conn: &Connection) -> AppResult<Vec<Organization>> {
    let mut stmt = conn.prepare("SELECT * FROM organizations ORDER BY id ASC")?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Update an organization (all fields except id).
pub fn update_org(conn: &Connection, org: &Organization) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE organizations
         SET name = ?1, photo_on_punch = ?2, gps_tracking = ?3,
             auto_clock_out = ?4, auto_clock_out_time = ?5
         WHERE id = ?6",
        params![
            org.name,
            if org.photo_on_punch { 1 } else { 0 },
            if org.gps_tracking { 1 } else { 0 },
            if org.auto_clock_out.enabled { 1 } else { 0 },
            org.auto_clock_out
                .time
                .map(|t| t.format("%H:%M").to_string()),
            org.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::OrganizationNotFound(org.id.clone()));
    }
    Ok(())
}
