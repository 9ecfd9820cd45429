use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::capture::{
    CommandLocation, DirPhotoStore, LocationProvider, NoLocation, StaticLocation, SystemClock,
};
use crate::core::punch::{PunchContext, PunchLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::geo::GeoPoint;
use crate::ui::messages::info;
use std::path::PathBuf;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch {
        kind,
        worker,
        comment,
        photo,
        no_photo,
        lat,
        lng,
        device,
    } = cmd
    {
        // 1️⃣ Resolve the worker and open the database
        let worker_id = cfg.worker_for(worker)?;
        let mut pool = DbPool::new(&cfg.database)?;

        // 2️⃣ Read the photo file, if one was passed
        let photo_bytes = match photo {
            Some(path) => Some(std::fs::read(path)?),
            None => None,
        };

        let ctx = PunchContext {
            comment: comment.clone(),
            photo: photo_bytes,
            skip_photo: *no_photo,
            device: device.clone().unwrap_or_else(|| cfg.device_label.clone()),
        };

        // 3️⃣ Capture sources: position lookup and photo storage
        let location = location_provider(*lat, *lng, cfg)?;
        let photos = DirPhotoStore {
            root: PathBuf::from(&cfg.photo_dir),
        };
        let timeout = Duration::from_secs(cfg.location_timeout_secs);

        // 4️⃣ Record the punch
        let punch = PunchLogic::record(
            &mut pool,
            &worker_id,
            kind.to_kind(),
            ctx,
            &SystemClock,
            location.as_ref(),
            timeout,
            &photos,
        )?;

        if let Some(pos) = &punch.location {
            info(format!("Position: {}", pos.display()));
        }
        if let Some(url) = &punch.photo_url {
            info(format!("Photo stored at {url}"));
        }
    }

    Ok(())
}

/// Pick the position source for this punch. Explicit coordinates on the
/// command line win, then the configured lookup command, then the fixed
/// site position. No source at all degrades to a punch without location.
fn location_provider(
    lat: Option<f64>,
    lng: Option<f64>,
    cfg: &Config,
) -> AppResult<Box<dyn LocationProvider>> {
    if let (Some(lat), Some(lng)) = (lat, lng) {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::InvalidCoordinate(format!(
                "latitude {lat} is outside -90..=90"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::InvalidCoordinate(format!(
                "longitude {lng} is outside -180..=180"
            )));
        }
        return Ok(Box::new(StaticLocation(GeoPoint::new(lat, lng))));
    }

    if !cfg.location_command.is_empty() {
        return Ok(Box::new(CommandLocation {
            command: cfg.location_command.clone(),
        }));
    }

    if let (Some(lat), Some(lng)) = (cfg.site_latitude, cfg.site_longitude) {
        return Ok(Box::new(StaticLocation(GeoPoint::new(lat, lng))));
    }

    Ok(Box::new(NoLocation))
}
