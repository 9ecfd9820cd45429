//! Derived session view: current status plus a live elapsed duration.
//! Nothing here is persisted; everything is recomputed from the latest
//! punch and the wall clock.

use crate::models::punch::Punch;
use crate::models::status::ClockStatus;
use chrono::{DateTime, Duration, Utc};

/// Elapsed time since `since`, clamped to zero. Always recomputed from the
/// two instants: no accumulator, so a delayed refresh tick cannot drift.
pub fn compute_elapsed(since: &DateTime<Utc>, now: &DateTime<Utc>) -> Duration {
    let d = now.signed_duration_since(*since);
    if d < Duration::zero() { Duration::zero() } else { d }
}

/// Compact "HH:MM:SS" rendering for a 1-second tick display.
pub fn format_elapsed_compact(elapsed: &Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Coarse "NNh NNm" rendering for a 60-second tick display.
pub fn format_elapsed_coarse(elapsed: &Duration) -> String {
    let total_m = elapsed.num_minutes().max(0);
    format!("{:02}h {:02}m", total_m / 60, total_m % 60)
}

/// A point-in-time view of one worker's clock.
#[derive(Debug, Clone)]
pub struct Session {
    pub status: ClockStatus,
    /// Timestamp the live duration counts from, present while the worker
    /// is clocked in or on break.
    pub since: Option<DateTime<Utc>>,
    pub last: Option<Punch>,
}

impl Session {
    /// Derive the view from the single most-recent punch (or none).
    pub fn from_latest(latest: Option<Punch>) -> Self {
        let status = ClockStatus::from_last_kind(latest.as_ref().map(|p| p.kind));
        let since = if status.is_working() {
            latest.as_ref().map(|p| p.punch_time)
        } else {
            None
        };

        Self {
            status,
            since,
            last: latest,
        }
    }

    pub fn elapsed(&self, now: &DateTime<Utc>) -> Option<Duration> {
        self.since.map(|s| compute_elapsed(&s, now))
    }
}
