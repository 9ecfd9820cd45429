//! Injectable capture providers: wall clock, geolocation, photo storage.
//! The punch path talks to these traits only, so a denied or slow capture
//! degrades to "no metadata" without ever touching the state machine.

use crate::errors::AppResult;
use crate::models::geo::GeoPoint;
use crate::utils::path::ensure_dir;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Default bound for a geolocation lookup.
pub const LOCATION_TIMEOUT_SECS: u64 = 10;

pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for deterministic flows and tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub trait LocationProvider {
    /// Best-effort position lookup, bounded by `timeout`. Returns None on
    /// timeout, denial or garbage output. Never hangs and never errors: a
    /// missing coordinate must not block a punch.
    fn current_position(&self, timeout: Duration) -> Option<GeoPoint>;
}

pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn current_position(&self, _timeout: Duration) -> Option<GeoPoint> {
        None
    }
}

/// Fixed coordinates, e.g. the site position configured for a kiosk.
pub struct StaticLocation(pub GeoPoint);

impl LocationProvider for StaticLocation {
    fn current_position(&self, _timeout: Duration) -> Option<GeoPoint> {
        Some(self.0)
    }
}

/// Runs an external command expected to print "LAT,LNG" on stdout.
/// The command runs on a worker thread; `recv_timeout` enforces the bound,
/// and a late result is simply dropped with the channel.
pub struct CommandLocation {
    pub command: String,
}

impl LocationProvider for CommandLocation {
    fn current_position(&self, timeout: Duration) -> Option<GeoPoint> {
        let command = self.command.clone();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(run_location_command(&command));
        });

        match rx.recv_timeout(timeout) {
            Ok(pos) => pos,
            Err(_) => None,
        }
    }
}

fn run_location_command(command: &str) -> Option<GeoPoint> {
    let output = if cfg!(target_os = "windows") {
        std::process::Command::new("cmd")
            .args(["/C", command])
            .output()
    } else {
        std::process::Command::new("sh")
            .args(["-c", command])
            .output()
    }
    .ok()?;

    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout);
    parse_lat_lng(text.trim())
}

/// Parse a "LAT,LNG" pair, rejecting out-of-range coordinates.
pub fn parse_lat_lng(s: &str) -> Option<GeoPoint> {
    let (lat, lng) = s.split_once(',')?;
    let latitude: f64 = lat.trim().parse().ok()?;
    let longitude: f64 = lng.trim().parse().ok()?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    Some(GeoPoint::new(latitude, longitude))
}

pub trait PhotoStore {
    /// Store captured photo bytes and return a reference URL. Errors are
    /// reported to the caller, which degrades to a punch without a photo.
    fn store(
        &self,
        org_id: &str,
        worker_id: &str,
        bytes: &[u8],
        taken_at: &DateTime<Utc>,
    ) -> AppResult<String>;
}

/// Filesystem store laying photos out as punch-photos/ORG/WORKER/TS.jpg
/// under a configurable root.
pub struct DirPhotoStore {
    pub root: PathBuf,
}

impl PhotoStore for DirPhotoStore {
    fn store(
        &self,
        org_id: &str,
        worker_id: &str,
        bytes: &[u8],
        taken_at: &DateTime<Utc>,
    ) -> AppResult<String> {
        let dir = self.root.join("punch-photos").join(org_id).join(worker_id);
        ensure_dir(&dir)?;

        let file = dir.join(format!("{}.jpg", taken_at.timestamp_millis()));
        std::fs::write(&file, bytes)?;

        Ok(file.to_string_lossy().to_string())
    }
}
