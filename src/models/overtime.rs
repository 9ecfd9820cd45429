use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// Lifecycle of an overtime request: a single pending → terminal hop.
/// Terminal states are never left again.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum OvertimeStatus {
    Pending,
    Approved,
    Rejected,
}

impl OvertimeStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OvertimeStatus::Pending => "pending",
            OvertimeStatus::Approved => "approved",
            OvertimeStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OvertimeStatus::Pending),
            "approved" => Some(OvertimeStatus::Approved),
            "rejected" => Some(OvertimeStatus::Rejected),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OvertimeStatus::Pending => "Pending",
            OvertimeStatus::Approved => "Approved",
            OvertimeStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OvertimeStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OvertimeRequest {
    pub id: i64,                          // ⇔ overtime_requests.id
    pub worker_id: String,                // ⇔ overtime_requests.worker_id
    pub org_id: String,                   // ⇔ overtime_requests.org_id
    pub request_date: DateTime<Utc>,      // ⇔ overtime_requests.request_date
    pub overtime_date: NaiveDate,         // ⇔ overtime_requests.overtime_date ("YYYY-MM-DD")
    pub start_time: NaiveTime,            // ⇔ overtime_requests.start_time ("HH:MM")
    pub end_time: NaiveTime,              // ⇔ overtime_requests.end_time ("HH:MM")
    pub duration_hours: f64,              // ⇔ overtime_requests.duration_hours
    pub reason: String,                   // ⇔ overtime_requests.reason
    pub status: OvertimeStatus,           // ⇔ overtime_requests.status
    pub approver_id: Option<String>,      // ⇔ overtime_requests.approver_id
    pub approver_name: Option<String>,    // ⇔ overtime_requests.approver_name
    pub approved_at: Option<DateTime<Utc>>, // ⇔ overtime_requests.approved_at
}

impl OvertimeRequest {
    /// Hours implied by the requested window. Stored `duration_hours` is
    /// caller-supplied and intentionally not recomputed from this; the two
    /// can disagree (the list view flags the drift).
    pub fn window_hours(&self) -> f64 {
        let mins = (self.end_time - self.start_time).num_minutes();
        mins as f64 / 60.0
    }
}

/// Aggregates over a worker's request set, computed on demand.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OvertimeStats {
    pub total_requests: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_approved_hours: f64,
    pub avg_request_hours: f64,
}
