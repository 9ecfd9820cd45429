use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Organization used when a command does not pass --org.
    #[serde(default = "default_org")]
    pub default_org: String,
    /// Worker used when a command does not pass --worker.
    #[serde(default)]
    pub default_worker: String,
    /// Label stored on punches recorded from this machine.
    #[serde(default = "default_device_label")]
    pub device_label: String,
    /// Upper bound for a geolocation lookup, in seconds.
    #[serde(default = "default_location_timeout")]
    pub location_timeout_secs: u64,
    /// External command printing "LAT,LNG" on stdout. Empty disables it.
    #[serde(default)]
    pub location_command: String,
    /// Fixed site coordinates, used when no location command is set.
    #[serde(default)]
    pub site_latitude: Option<f64>,
    #[serde(default)]
    pub site_longitude: Option<f64>,
    /// Root directory for stored punch photos.
    #[serde(default = "default_photo_dir")]
    pub photo_dir: String,
}

fn default_org() -> String {
    "main".to_string()
}
fn default_device_label() -> String {
    "cli".to_string()
}
fn default_location_timeout() -> u64 {
    crate::core::capture::LOCATION_TIMEOUT_SECS
}
fn default_photo_dir() -> String {
    Config::config_dir().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_org: default_org(),
            default_worker: String::new(),
            device_label: default_device_label(),
            location_timeout_secs: default_location_timeout(),
            location_command: String::new(),
            site_latitude: None,
            site_longitude: None,
            photo_dir: default_photo_dir(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimeclock")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtimeclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
                    crate::ui::messages::warning(format!(
                        "Could not parse {:?} ({}). Using defaults.",
                        path, e
                    ));
                    Config::default()
                }),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Resolve the worker a command acts on: the --worker flag wins, then
    /// the configured default.
    pub fn worker_for(&self, flag: &Option<String>) -> crate::errors::AppResult<String> {
        match flag {
            Some(w) => Ok(w.clone()),
            None if !self.default_worker.is_empty() => Ok(self.default_worker.clone()),
            None => Err(crate::errors::AppError::Config(
                "no worker specified (pass --worker or set default_worker in the config)"
                    .to_string(),
            )),
        }
    }

    /// Resolve the organization a command acts on.
    pub fn org_for(&self, flag: &Option<String>) -> String {
        flag.clone().unwrap_or_else(|| self.default_org.clone())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided (~ expanded) or default
        let db_path = if let Some(name) = custom_name {
            let p = crate::utils::path::expand_tilde(&name);
            if p.is_absolute() {
                p
            } else {
                dir.join(p)
            }
        } else {
            dir.join("rtimeclock.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
