use crate::errors::{AppError, AppResult};
use crate::utils::time::local_to_utc;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Resolve a period expression to an inclusive date span.
/// Accepted forms: "YYYY-MM-DD" (one day), "YYYY-MM" (whole month),
/// "YYYY" (whole year), "START:END" (both sides any of the above).
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start, end)) = p.split_once(':') {
        let (s, _) = simple_bounds(start)?;
        let (_, e) = simple_bounds(end)?;
        if s > e {
            return Err(AppError::InvalidDate(p.to_string()));
        }
        return Ok((s, e));
    }
    simple_bounds(p)
}

fn simple_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d") {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let Some(first) = NaiveDate::from_ymd_opt(year, 1, 1)
        && let Some(last) = NaiveDate::from_ymd_opt(year, 12, 31)
    {
        return Ok((first, last));
    }

    Err(AppError::InvalidDate(p.to_string()))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // The first of the following month always exists
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .map(|d| d - Duration::days(1))
        .unwrap_or(NaiveDate::MAX)
}

/// UTC half-open window [start, end) covering the given local calendar days.
/// Used to query UTC-stored punches by local date.
pub fn local_span_utc(first: NaiveDate, last: NaiveDate) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let midnight = NaiveTime::MIN;
    let start = local_to_utc(first.and_time(midnight))?;
    let end = local_to_utc((last + Duration::days(1)).and_time(midnight))?;
    Ok((start, end))
}
