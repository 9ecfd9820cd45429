use chrono::NaiveTime;
use serde::Serialize;

/// Daily auto clock-out policy of an organization. When enabled, every
/// worker still clocked in at `time` is force-punched OUT by the sweep,
/// unless individually exempt.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AutoClockOutPolicy {
    pub enabled: bool,
    pub time: Option<NaiveTime>,
}

impl AutoClockOutPolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            time: None,
        }
    }

    /// The cutoff wall time, if the policy is active.
    pub fn cutoff(&self) -> Option<NaiveTime> {
        if self.enabled { self.time } else { None }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Organization {
    pub id: String,                      // ⇔ organizations.id
    pub name: String,                    // ⇔ organizations.name
    pub photo_on_punch: bool,            // ⇔ organizations.photo_on_punch
    pub gps_tracking: bool,              // ⇔ organizations.gps_tracking
    pub auto_clock_out: AutoClockOutPolicy, // ⇔ organizations.auto_clock_out / auto_clock_out_time
    pub created_at: String,              // ⇔ organizations.created_at (TEXT, ISO8601)
}
