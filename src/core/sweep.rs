use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{orgs, punches, workers};
use crate::errors::AppResult;
use crate::models::punch::Punch;
use crate::models::status::ClockStatus;
use crate::ui::messages::{info, success};
use crate::utils::time::{fmt_local_ts, local_to_utc};
use chrono::NaiveDate;

/// High-level business logic for the auto clock-out sweep.
pub struct SweepLogic;

#[derive(Debug, Default)]
pub struct SweepOutcome {
    /// Ids of the workers that received a synthetic OUT.
    pub swept: Vec<String>,
    pub exempt: usize,
    pub already_out: usize,
    /// Still working, but their latest punch is past the cutoff.
    pub after_cutoff: usize,
}

impl SweepLogic {
    /// Force-punch OUT every worker of the org still clocked in (or on
    /// break) at the configured cutoff of the given day. The synthetic
    /// record carries the cutoff instant, not wall-clock now.
    ///
    /// Idempotent: a second run sees the synthetic OUT as the latest
    /// record, derives ClockedOut and writes nothing. Workers whose latest
    /// punch is after the cutoff are skipped, so the synthetic OUT can
    /// never land before an existing record.
    pub fn run(pool: &mut DbPool, org_id: &str, date: NaiveDate) -> AppResult<SweepOutcome> {
        //
        // 1️⃣ RESOLVE POLICY
        //
        let org = orgs::load_org(&pool.conn, org_id)?;

        let Some(cutoff_wall) = org.auto_clock_out.cutoff() else {
            info(format!("Auto clock-out is disabled for '{}'.", org.id));
            return Ok(SweepOutcome::default());
        };

        // Cutoff instant: the org's wall time on the given day
        let cutoff = local_to_utc(date.and_time(cutoff_wall))?;
        let mut outcome = SweepOutcome::default();

        //
        // 2️⃣ WALK THE ROSTER
        //
        let roster = workers::load_workers_for_org(&pool.conn, org_id)?;

        for worker in roster {
            if worker.is_exempt() {
                outcome.exempt += 1;
                continue;
            }

            let tx = pool.conn.transaction()?;

            let latest = punches::latest_punch(&tx, org_id, &worker.id)?;
            let status = ClockStatus::from_last_kind(latest.as_ref().map(|p| p.kind));

            // Gate on "still clocked in" before writing
            if !status.is_working() {
                outcome.already_out += 1;
                continue;
            }

            if let Some(last) = &latest
                && last.punch_time > cutoff
            {
                outcome.after_cutoff += 1;
                continue;
            }

            let mut punch = Punch::auto_out(&worker.id, org_id, cutoff);
            punch.id = punches::insert_punch(&tx, &punch)?;

            ttlog(
                &tx,
                "sweep",
                &format!("worker {}", worker.id),
                &format!("Auto clock-out at {}", fmt_local_ts(&cutoff)),
            )?;

            tx.commit()?;

            outcome.swept.push(worker.id);
        }

        //
        // 3️⃣ REPORT
        //
        if outcome.swept.is_empty() {
            info(format!(
                "No workers to auto clock-out for '{}' on {}.",
                org.id, date
            ));
        } else {
            success(format!(
                "⏱️ Auto clock-out for '{}' on {}: {} worker(s) punched out at {}.",
                org.id,
                date,
                outcome.swept.len(),
                cutoff_wall.format("%H:%M"),
            ));
        }

        Ok(outcome)
    }
}
