use crate::core::capture::Clock;
use crate::core::session::{Session, format_elapsed_coarse, format_elapsed_compact};
use crate::db::pool::DbPool;
use crate::db::punches::latest_punch;
use crate::db::workers::{load_worker, load_workers_for_org};
use crate::errors::AppResult;
use crate::models::worker::Worker;
use crate::utils::colors::{GREY, RESET, colorize_optional};
use crate::utils::formatting::describe_status;
use crate::utils::table::{Column, Table};
use crate::utils::time::fmt_local_ts;
use std::io::Write;
use std::thread;
use std::time::Duration as StdDuration;

pub struct StatusLogic;

impl StatusLogic {
    /// Load the worker together with the session view derived from the
    /// single most-recent punch.
    pub fn session_for(pool: &DbPool, worker_id: &str) -> AppResult<(Worker, Session)> {
        let worker = load_worker(&pool.conn, worker_id)?;
        let latest = latest_punch(&pool.conn, &worker.org_id, worker_id)?;
        Ok((worker, Session::from_latest(latest)))
    }

    /// One-shot status printout for a single worker.
    pub fn print_single(
        pool: &DbPool,
        worker_id: &str,
        clock: &dyn Clock,
        coarse: bool,
    ) -> AppResult<()> {
        let (worker, session) = Self::session_for(pool, worker_id)?;
        let now = clock.now_utc();

        let (label, color) = describe_status(session.status);
        println!(
            "👤 {} ({}): {}{}{}",
            worker.display_name,
            worker.role.to_db_str(),
            color,
            label,
            RESET
        );

        if let Some(since) = session.since
            && let Some(elapsed) = session.elapsed(&now)
        {
            let shown = if coarse {
                format_elapsed_coarse(&elapsed)
            } else {
                format_elapsed_compact(&elapsed)
            };
            println!("   since {} ({} elapsed)", fmt_local_ts(&since), shown);
        }

        if let Some(last) = &session.last {
            let (kind_label, _) = crate::utils::formatting::describe_kind(last.kind);
            println!("   last punch: {} at {}", kind_label, last.local_time_str());
            if last.auto_clock_out {
                println!("   {GREY}recorded by the auto clock-out sweep{RESET}");
            }
            if let Some(comment) = &last.comment {
                println!("   comment: {}", comment);
            }
            if let Some(loc) = &last.location {
                println!("   location: {}", loc.display());
            }
            if let Some(photo) = &last.photo_url {
                println!("   photo: {}", photo);
            }
            if last.edit_count() > 0 {
                println!("   {GREY}time corrected {} time(s){RESET}", last.edit_count());
            }
        } else {
            println!("   {GREY}no punches recorded yet{RESET}");
        }

        Ok(())
    }

    /// Roster overview: one row per worker of the organization, with the
    /// derived status and elapsed time recomputed against the same instant.
    pub fn print_team(pool: &DbPool, org_id: &str, clock: &dyn Clock) -> AppResult<()> {
        let workers = load_workers_for_org(&pool.conn, org_id)?;
        let now = clock.now_utc();

        let mut table = Table::new(vec![
            Column::new("Worker", 12),
            Column::new("Name", 20),
            Column::new("Role", 11),
            Column::new("Status", 13),
            Column::new("Last Punch", 19),
            Column::new("Elapsed", 9),
        ]);

        let mut working = 0usize;
        for worker in &workers {
            let latest = latest_punch(&pool.conn, org_id, &worker.id)?;
            let session = Session::from_latest(latest);

            let (label, color) = describe_status(session.status);
            if session.status.is_working() {
                working += 1;
            }

            let last_cell = session
                .last
                .as_ref()
                .map(|p| fmt_local_ts(&p.punch_time))
                .unwrap_or_else(|| "-".to_string());
            let elapsed_cell = session
                .elapsed(&now)
                .map(|e| format_elapsed_coarse(&e))
                .unwrap_or_else(|| "-".to_string());

            let last_cell = colorize_optional(&last_cell);
            let elapsed_cell = colorize_optional(&elapsed_cell);

            table.add_row(vec![
                worker.id.clone(),
                worker.display_name.clone(),
                worker.role.to_db_str().to_string(),
                format!("{}{}{}", color, label, RESET),
                last_cell,
                elapsed_cell,
            ]);
        }

        println!("{}", table.render());
        println!(
            "{} worker(s), {} currently working",
            workers.len(),
            working
        );
        Ok(())
    }

    /// Live single-line status that refreshes in place. The elapsed value is
    /// recomputed from the stored punch time and the wall clock on every
    /// tick, so a missed tick cannot make it drift. Runs until interrupted.
    pub fn watch(pool: &DbPool, worker_id: &str, coarse: bool) -> AppResult<()> {
        let tick = if coarse {
            StdDuration::from_secs(60)
        } else {
            StdDuration::from_secs(1)
        };

        loop {
            let (worker, session) = Self::session_for(pool, worker_id)?;
            let now = chrono::Utc::now();
            let (label, color) = describe_status(session.status);

            let line = match session.elapsed(&now) {
                Some(elapsed) => {
                    let shown = if coarse {
                        format_elapsed_coarse(&elapsed)
                    } else {
                        format_elapsed_compact(&elapsed)
                    };
                    format!(
                        "{}: {}{}{} for {}",
                        worker.display_name, color, label, RESET, shown
                    )
                }
                None => format!("{}: {}{}{}", worker.display_name, color, label, RESET),
            };

            // Pad the tail so a shorter line fully overwrites the previous one.
            print!("\r{:<60}", line);
            let _ = std::io::stdout().flush();
            thread::sleep(tick);
        }
    }
}
