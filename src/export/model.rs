// src/export/model.rs

use crate::models::punch::Punch;
use serde::Serialize;

/// Flat punch record for export.
#[derive(Serialize, Clone, Debug)]
pub struct PunchExport {
    pub id: i64,
    pub worker: String,
    pub name: String,
    pub time: String,
    pub kind: String,
    pub auto: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo: Option<String>,
    pub device: String,
    pub comment: Option<String>,
    pub edits: usize,
}

impl PunchExport {
    /// Flatten a stored punch. Times are rendered in the local timezone,
    /// which is what a reviewed timesheet wants to show.
    pub fn from_punch(p: &Punch, worker_name: &str) -> Self {
        Self {
            id: p.id,
            worker: p.worker_id.clone(),
            name: worker_name.to_string(),
            time: p.local_time_str(),
            kind: p.kind.label().to_string(),
            auto: p.auto_clock_out,
            latitude: p.location.map(|g| g.latitude),
            longitude: p.location.map(|g| g.longitude),
            photo: p.photo_url.clone(),
            device: p.device.clone(),
            comment: p.comment.clone(),
            edits: p.edit_count(),
        }
    }
}

/// Headers for CSV / JSON / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id", "worker", "name", "time", "kind", "auto", "latitude", "longitude", "photo",
        "device", "comment", "edits",
    ]
}

/// Convert a punch into a row of strings (for PDF).
pub(crate) fn punch_to_row(p: &PunchExport) -> Vec<String> {
    vec![
        p.id.to_string(),
        p.worker.clone(),
        p.name.clone(),
        p.time.clone(),
        p.kind.clone(),
        if p.auto { "yes".to_string() } else { String::new() },
        p.latitude.map(|v| format!("{:.5}", v)).unwrap_or_default(),
        p.longitude.map(|v| format!("{:.5}", v)).unwrap_or_default(),
        p.photo.clone().unwrap_or_default(),
        p.device.clone(),
        p.comment.clone().unwrap_or_default(),
        p.edits.to_string(),
    ]
}

pub(crate) fn punches_to_table(punches: &[PunchExport]) -> Vec<Vec<String>> {
    punches.iter().map(punch_to_row).collect()
}
