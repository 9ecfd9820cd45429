use crate::core::capture::Clock;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{overtime, workers};
use crate::errors::{AppError, AppResult};
use crate::models::overtime::{OvertimeRequest, OvertimeStats, OvertimeStatus};
use crate::ui::messages::success;
use crate::utils::formatting::fmt_hours;
use chrono::{NaiveDate, NaiveTime};

/// High-level business logic for the overtime request workflow.
pub struct OvertimeLogic;

impl OvertimeLogic {
    /// File a new request. It starts PENDING; `duration_hours` is taken as
    /// supplied and not derived from the window.
    #[allow(clippy::too_many_arguments)]
    pub fn file(
        pool: &mut DbPool,
        worker_id: &str,
        overtime_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        duration_hours: f64,
        reason: &str,
        clock: &dyn Clock,
    ) -> AppResult<OvertimeRequest> {
        //
        // 1️⃣ VALIDATE INPUT
        //
        let worker = workers::load_worker(&pool.conn, worker_id)?;

        if end_time <= start_time {
            return Err(AppError::InvalidOvertimeRequest(
                "End time must be later than start time.".into(),
            ));
        }
        if duration_hours <= 0.0 {
            return Err(AppError::InvalidOvertimeRequest(
                "Requested hours must be positive.".into(),
            ));
        }

        //
        // 2️⃣ PERSIST AS PENDING
        //
        let mut req = OvertimeRequest {
            id: 0,
            worker_id: worker.id.clone(),
            org_id: worker.org_id.clone(),
            request_date: clock.now_utc(),
            overtime_date,
            start_time,
            end_time,
            duration_hours,
            reason: reason.to_string(),
            status: OvertimeStatus::Pending,
            approver_id: None,
            approver_name: None,
            approved_at: None,
        };
        req.id = overtime::insert_request(&pool.conn, &req)?;

        ttlog(
            &pool.conn,
            "overtime",
            &format!("request {}", req.id),
            &format!(
                "{} filed {} for {} ({}–{})",
                worker.id,
                fmt_hours(duration_hours),
                overtime_date,
                start_time.format("%H:%M"),
                end_time.format("%H:%M"),
            ),
        )?;

        success(format!(
            "Overtime request #{} filed: {} on {}.",
            req.id,
            fmt_hours(duration_hours),
            overtime_date
        ));

        Ok(req)
    }

    /// Terminal transition, exactly-once. The conditional update only fires
    /// while the row is still pending; resolving a terminal request is a
    /// typed error with no state change.
    pub fn resolve(
        pool: &mut DbPool,
        request_id: i64,
        approver_id: &str,
        decision: OvertimeStatus,
        clock: &dyn Clock,
    ) -> AppResult<OvertimeRequest> {
        //
        // 1️⃣ APPROVER AUTHORIZATION
        //
        let approver = workers::load_worker(&pool.conn, approver_id)?;
        if !approver.role.can_manage() {
            return Err(AppError::NotAuthorized(approver.id));
        }

        if !decision.is_terminal() {
            return Err(AppError::Other(
                "Resolution must be approved or rejected.".into(),
            ));
        }

        let req = overtime::load_request(&pool.conn, request_id)?;
        if req.org_id != approver.org_id {
            return Err(AppError::WrongOrganization {
                worker: approver.id.clone(),
                org: req.org_id.clone(),
            });
        }

        //
        // 2️⃣ CONDITIONAL TERMINAL WRITE
        //
        let changed = overtime::resolve_request(
            &pool.conn,
            request_id,
            decision,
            &approver.id,
            &approver.display_name,
            &clock.now_utc(),
        )?;

        if changed == 0 {
            // The row exists (loaded above), so it must already be terminal
            let current = overtime::load_request(&pool.conn, request_id)?;
            return Err(AppError::AlreadyResolved {
                id: request_id,
                status: current.status.to_db_str().to_string(),
            });
        }

        ttlog(
            &pool.conn,
            "overtime",
            &format!("request {}", request_id),
            &format!("{} by {}", decision.label(), approver.id),
        )?;

        success(format!(
            "Overtime request #{} {} by {}.",
            request_id,
            decision.label().to_lowercase(),
            approver.display_name
        ));

        overtime::load_request(&pool.conn, request_id)
    }

    /// Aggregates over a request set: total approved hours, mean requested
    /// hours over all statuses, counts by status. Pure, computed on demand.
    pub fn stats(requests: &[OvertimeRequest]) -> OvertimeStats {
        let total_requests = requests.len();

        let mut pending = 0;
        let mut approved = 0;
        let mut rejected = 0;
        let mut total_approved_hours = 0.0;
        let mut total_hours = 0.0;

        for req in requests {
            total_hours += req.duration_hours;
            match req.status {
                OvertimeStatus::Pending => pending += 1,
                OvertimeStatus::Approved => {
                    approved += 1;
                    total_approved_hours += req.duration_hours;
                }
                OvertimeStatus::Rejected => rejected += 1,
            }
        }

        let avg_request_hours = if total_requests > 0 {
            total_hours / total_requests as f64
        } else {
            0.0
        };

        OvertimeStats {
            total_requests,
            pending,
            approved,
            rejected,
            total_approved_hours,
            avg_request_hours,
        }
    }
}
