//! Time utilities: UTC timestamp storage format, HH:MM parsing, local display.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Storage format for punch timestamps. Always UTC, so the lexicographic
/// order of the TEXT column matches chronological order and two punches one
/// second apart stay distinguishable.
pub const TS_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn fmt_utc_ts(dt: &DateTime<Utc>) -> String {
    dt.format(TS_FMT).to_string()
}

pub fn parse_utc_ts(s: &str) -> AppResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, TS_FMT)
        .map(|naive| naive.and_utc())
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Render a stored UTC instant in the local timezone for display.
pub fn fmt_local_ts(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format(TS_FMT).to_string()
}

/// Parse user-supplied wall time, "YYYY-MM-DD HH:MM" with optional ":SS",
/// interpreted in the local timezone.
pub fn parse_local_input(s: &str) -> AppResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(s, TS_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))?;
    local_to_utc(naive)
}

/// Resolve a naive local datetime to UTC. A DST fold resolves to the
/// earliest valid instant; a wall time inside a DST gap is rejected.
pub fn local_to_utc(naive: NaiveDateTime) -> AppResult<DateTime<Utc>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(AppError::InvalidTimestamp(naive.to_string())),
    }
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_required_time(s: &str) -> AppResult<NaiveTime> {
    parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let duration = end - start;
    duration.num_minutes()
}
