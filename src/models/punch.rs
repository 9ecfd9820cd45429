use super::{audit::AuditEntry, geo::GeoPoint, punch_kind::PunchKind};
use crate::utils::time::fmt_local_ts;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// An immutable punch record. Append-only: records are never deleted, and
/// the only mutation ever applied is the audited time correction, which
/// rewrites `punch_time` while pushing the old value onto `audit_trail`.
#[derive(Debug, Clone, Serialize)]
pub struct Punch {
    pub id: i64,                     // ⇔ punches.id (INTEGER PK)
    pub worker_id: String,           // ⇔ punches.worker_id
    pub org_id: String,              // ⇔ punches.org_id
    pub punch_time: DateTime<Utc>,   // ⇔ punches.punch_time (TEXT, UTC "YYYY-MM-DD HH:MM:SS")
    pub kind: PunchKind,             // ⇔ punches.kind ('in'|'out'|'break_start'|'break_end')
    pub auto_clock_out: bool,        // ⇔ punches.auto_clock_out (INT 0/1)
    pub comment: Option<String>,     // ⇔ punches.comment
    pub location: Option<GeoPoint>,  // ⇔ punches.latitude / punches.longitude
    pub photo_url: Option<String>,   // ⇔ punches.photo_url
    pub device: String,              // ⇔ punches.device (TEXT, default 'cli')
    pub audit_trail: Vec<AuditEntry>, // ⇔ punches.audit_trail (TEXT, JSON array)
    pub created_at: String,          // ⇔ punches.created_at (TEXT, ISO8601)
}

impl Punch {
    /// Constructor for worker-initiated punches. The id is assigned by the
    /// database on insert; `auto_clock_out` is always false on this path.
    pub fn new(
        worker_id: &str,
        org_id: &str,
        punch_time: DateTime<Utc>,
        kind: PunchKind,
        comment: Option<String>,
        location: Option<GeoPoint>,
        photo_url: Option<String>,
        device: &str,
    ) -> Self {
        Self {
            id: 0,
            worker_id: worker_id.to_string(),
            org_id: org_id.to_string(),
            punch_time,
            kind,
            auto_clock_out: false,
            comment,
            location,
            photo_url,
            device: device.to_string(),
            audit_trail: Vec::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Constructor for the synthetic OUT written by the auto clock-out
    /// sweep. `punch_time` is the org cutoff instant, not wall-clock now.
    pub fn auto_out(worker_id: &str, org_id: &str, cutoff: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            worker_id: worker_id.to_string(),
            org_id: org_id.to_string(),
            punch_time: cutoff,
            kind: PunchKind::Out,
            auto_clock_out: true,
            comment: None,
            location: None,
            photo_url: None,
            device: "auto-clock-out".to_string(),
            audit_trail: Vec::new(),
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Punch time rendered in the local timezone for display.
    pub fn local_time_str(&self) -> String {
        fmt_local_ts(&self.punch_time)
    }

    pub fn edit_count(&self) -> usize {
        self.audit_trail.len()
    }
}
