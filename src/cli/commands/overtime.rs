use crate::cli::parser::OvertimeAction;
use crate::config::Config;
use crate::core::capture::SystemClock;
use crate::core::overtime::OvertimeLogic;
use crate::db::overtime::{load_requests_for_org, load_requests_for_worker};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::overtime::{OvertimeRequest, OvertimeStatus};
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREY, RESET, colorize_optional};
use crate::utils::date::parse_date;
use crate::utils::formatting::{describe_overtime_status, fmt_hours};
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_required_time;

/// Tolerance between the claimed hours and the hours implied by the
/// start/end window before the listing flags the divergence. One minute.
const WINDOW_DRIFT_HOURS: f64 = 1.0 / 60.0;

pub fn handle(action: &OvertimeAction, cfg: &Config) -> AppResult<()> {
    match action {
        OvertimeAction::File {
            worker,
            date,
            start,
            end,
            hours,
            reason,
        } => {
            let worker_id = cfg.worker_for(worker)?;
            let mut pool = DbPool::new(&cfg.database)?;

            let overtime_date =
                parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;
            let start_time = parse_required_time(start)?;
            let end_time = parse_required_time(end)?;

            OvertimeLogic::file(
                &mut pool,
                &worker_id,
                overtime_date,
                start_time,
                end_time,
                *hours,
                reason,
                &SystemClock,
            )?;
        }

        OvertimeAction::Resolve {
            id,
            approve,
            reject,
            approver,
        } => {
            let decision = match (approve, reject) {
                (true, false) => OvertimeStatus::Approved,
                (false, true) => OvertimeStatus::Rejected,
                _ => {
                    return Err(AppError::Other(
                        "pass exactly one of --approve or --reject".into(),
                    ));
                }
            };

            let mut pool = DbPool::new(&cfg.database)?;
            OvertimeLogic::resolve(&mut pool, *id, approver, decision, &SystemClock)?;
        }

        OvertimeAction::List {
            worker,
            org,
            status,
        } => {
            let pool = DbPool::new(&cfg.database)?;
            let mut requests = load_selection(&pool, cfg, worker, org)?;

            if let Some(s) = status {
                let wanted = OvertimeStatus::from_db_str(s)
                    .ok_or_else(|| AppError::InvalidStatus(s.clone()))?;
                requests.retain(|r| r.status == wanted);
            }

            print_list(&requests);
        }

        OvertimeAction::Stats { worker, org } => {
            let pool = DbPool::new(&cfg.database)?;
            let requests = load_selection(&pool, cfg, worker, org)?;
            print_stats(&requests);
        }
    }

    Ok(())
}

/// Requests by worker when --worker is passed, the whole organization
/// otherwise. Newest first, as loaded.
fn load_selection(
    pool: &DbPool,
    cfg: &Config,
    worker: &Option<String>,
    org: &Option<String>,
) -> AppResult<Vec<OvertimeRequest>> {
    let org_id = cfg.org_for(org);
    match worker {
        Some(w) => load_requests_for_worker(&pool.conn, &org_id, w),
        None => load_requests_for_org(&pool.conn, &org_id),
    }
}

fn print_list(requests: &[OvertimeRequest]) {
    if requests.is_empty() {
        info("No overtime requests found.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("Id", 4),
        Column::new("Worker", 12),
        Column::new("Date", 10),
        Column::new("Window", 13),
        Column::new("Hours", 7),
        Column::new("Status", 10),
        Column::new("Resolved By", 16),
    ]);

    for req in requests {
        let (label, color) = describe_overtime_status(req.status);
        let window = format!(
            "{}-{}",
            req.start_time.format("%H:%M"),
            req.end_time.format("%H:%M")
        );
        let hours = if (req.window_hours() - req.duration_hours).abs() > WINDOW_DRIFT_HOURS {
            format!("{} *", fmt_hours(req.duration_hours))
        } else {
            fmt_hours(req.duration_hours)
        };

        table.add_row(vec![
            req.id.to_string(),
            req.worker_id.clone(),
            req.overtime_date.to_string(),
            window,
            hours,
            format!("{}{}{}", color, label, RESET),
            colorize_optional(req.approver_name.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{}", table.render());

    if requests
        .iter()
        .any(|r| (r.window_hours() - r.duration_hours).abs() > WINDOW_DRIFT_HOURS)
    {
        println!("{GREY}* claimed hours differ from the start/end window{RESET}");
    }
}

fn print_stats(requests: &[OvertimeRequest]) {
    let stats = OvertimeLogic::stats(requests);

    header("Overtime statistics");
    println!("Requests:       {}", stats.total_requests);
    println!(
        "By status:      {} pending, {} approved, {} rejected",
        stats.pending, stats.approved, stats.rejected
    );
    println!("Approved hours: {}", fmt_hours(stats.total_approved_hours));
    println!("Average ask:    {}", fmt_hours(stats.avg_request_hours));
}
