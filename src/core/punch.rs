use crate::core::capture::{Clock, LocationProvider, PhotoStore};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{orgs, punches, workers};
use crate::errors::{AppError, AppResult};
use crate::models::audit::AuditEntry;
use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use crate::models::status::ClockStatus;
use crate::ui::messages::{success, warning};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// High-level business logic for recording and correcting punches.
pub struct PunchLogic;

/// Inputs resolved by the CLI layer before a punch is recorded.
pub struct PunchContext {
    pub comment: Option<String>,
    /// Captured photo bytes, when the worker provided one.
    pub photo: Option<Vec<u8>>,
    /// Explicit fallback: punch without a photo even if policy wants one.
    pub skip_photo: bool,
    pub device: String,
}

impl PunchLogic {
    /// Record a punch for a worker.
    ///
    /// Capture (photo, location) happens before the write and is
    /// best-effort; the transition check and the insert share one
    /// transaction so an illegal request can never leave a record behind.
    pub fn record(
        pool: &mut DbPool,
        worker_id: &str,
        kind: PunchKind,
        ctx: PunchContext,
        clock: &dyn Clock,
        location: &dyn LocationProvider,
        location_timeout: Duration,
        photos: &dyn PhotoStore,
    ) -> AppResult<Punch> {
        //
        // 1️⃣ RESOLVE WORKER + ORG POLICY
        //
        let worker = workers::load_worker(&pool.conn, worker_id)?;
        let org = orgs::load_org(&pool.conn, &worker.org_id)?;

        let now = clock.now_utc();

        //
        // 2️⃣ PHOTO GATE
        //
        // Mandatory for clock-in when the org enables photo-on-punch: with
        // no capture and no explicit fallback there is no record at all.
        // A failing store degrades to a punch without the photo.
        //
        let photo_url = if kind.is_in() && org.photo_on_punch && !ctx.skip_photo {
            match &ctx.photo {
                Some(bytes) => match photos.store(&org.id, &worker.id, bytes, &now) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warning(format!("Could not store photo ({}). Punching without it.", e));
                        None
                    }
                },
                None => return Err(AppError::PhotoRequired),
            }
        } else {
            None
        };

        //
        // 3️⃣ LOCATION CAPTURE (best-effort, bounded)
        //
        let position = if org.gps_tracking && worker.settings.track_gps {
            let pos = location.current_position(location_timeout);
            if pos.is_none() {
                warning("Position unavailable. Punching without location.");
            }
            pos
        } else {
            None
        };

        //
        // 4️⃣ VALIDATE + INSERT IN ONE TRANSACTION
        //
        // The legal next action is derived from the just-fetched latest
        // record, inside the same transaction as the insert. This is the
        // write-boundary guard: no UI state is trusted.
        //
        let tx = pool.conn.transaction()?;

        let latest = punches::latest_punch(&tx, &org.id, &worker.id)?;
        let status = ClockStatus::from_last_kind(latest.map(|p| p.kind));

        if !status.allows(kind) {
            return Err(AppError::IllegalTransition {
                state: status.describe(),
                attempted: kind.to_db_str(),
            });
        }

        let mut punch = Punch::new(
            &worker.id,
            &org.id,
            now,
            kind,
            ctx.comment,
            position,
            photo_url,
            &ctx.device,
        );
        punch.id = punches::insert_punch(&tx, &punch)?;

        ttlog(
            &tx,
            "punch",
            &format!("worker {}", worker.id),
            &format!("{} at {}", kind.label(), punch.local_time_str()),
        )?;

        tx.commit()?;

        success(format!(
            "{} recorded for {} at {}.",
            kind.label(),
            worker.display_name,
            punch.local_time_str()
        ));

        Ok(punch)
    }

    /// Audited time correction. Requires a managing role; rewrites
    /// `punch_time` and appends one history entry, atomically.
    pub fn edit_time(
        pool: &mut DbPool,
        punch_id: i64,
        editor_id: &str,
        new_time: DateTime<Utc>,
        reason: &str,
        clock: &dyn Clock,
    ) -> AppResult<Punch> {
        //
        // 1️⃣ EDITOR AUTHORIZATION
        //
        let editor = workers::load_worker(&pool.conn, editor_id)?;
        if !editor.role.can_manage() {
            return Err(AppError::NotAuthorized(editor.id));
        }

        //
        // 2️⃣ LOAD TARGET AND EXTEND ITS HISTORY
        //
        let mut punch = punches::load_punch(&pool.conn, punch_id)?;

        // Editors stay within their own organization
        if punch.org_id != editor.org_id {
            return Err(AppError::WrongOrganization {
                worker: editor.id.clone(),
                org: punch.org_id.clone(),
            });
        }

        let previous = punch.punch_time;
        punch.audit_trail.push(AuditEntry::new(
            &editor.id,
            &editor.display_name,
            reason,
            previous,
            clock.now_utc(),
        ));
        punch.punch_time = new_time;

        //
        // 3️⃣ SINGLE STATEMENT: TIMESTAMP + EXTENDED HISTORY
        //
        punches::apply_time_edit(&pool.conn, punch.id, &punch.punch_time, &punch.audit_trail)?;

        ttlog(
            &pool.conn,
            "edit",
            &format!("punch {}", punch.id),
            &format!(
                "Punch time corrected by {} ({}): {} → {}",
                editor.id,
                reason,
                crate::utils::time::fmt_utc_ts(&previous),
                crate::utils::time::fmt_utc_ts(&punch.punch_time),
            ),
        )?;

        success(format!(
            "✏️ Punch {} corrected to {} (edit #{}).",
            punch.id,
            punch.local_time_str(),
            punch.edit_count()
        ));

        Ok(punch)
    }
}
