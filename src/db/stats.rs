use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::parse_utc_ts;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) ROW COUNTS
    //
    let orgs: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM organizations", [], |row| row.get(0))?;
    let workers: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM workers", [], |row| row.get(0))?;
    let punches: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM punches", [], |row| row.get(0))?;
    let overtime: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM overtime_requests", [], |row| {
            row.get(0)
        })?;

    println!("{}• Organizations:{} {}{}{}", CYAN, RESET, GREEN, orgs, RESET);
    println!("{}• Workers:{} {}{}{}", CYAN, RESET, GREEN, workers, RESET);
    println!("{}• Punches:{} {}{}{}", CYAN, RESET, GREEN, punches, RESET);
    println!(
        "{}• Overtime requests:{} {}{}{}",
        CYAN, RESET, GREEN, overtime, RESET
    );

    //
    // 3) AUTO CLOCK-OUT SHARE
    //
    let auto: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM punches WHERE auto_clock_out = 1",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Auto clock-outs:{} {}", CYAN, RESET, auto);

    //
    // 4) PUNCH TIME RANGE
    //
    let first_ts: Option<String> = pool
        .conn
        .query_row(
            "SELECT punch_time FROM punches ORDER BY punch_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_ts: Option<String> = pool
        .conn
        .query_row(
            "SELECT punch_time FROM punches ORDER BY punch_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_ts
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_ts.clone().unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Punch range (UTC):{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 5) AVERAGE PUNCHES/DAY
    //
    if let (Some(f), Some(l)) = (first_ts, last_ts)
        && let (Ok(d1), Ok(d2)) = (parse_utc_ts(&f), parse_utc_ts(&l))
    {
        let days = (d2 - d1).num_days().max(1);
        let avg = punches as f64 / days as f64;
        println!("{}• Average punches/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
