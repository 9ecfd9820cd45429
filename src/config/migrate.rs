use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension};
use serde_yaml::Value;
use std::fs;

/// Migration that adds the `device_label` parameter to the YAML config,
/// if missing, and marks the migration as applied in the `log` table.
/// Punches store the originating device since 0.3; this names the label
/// recorded for punches made from this machine.
pub fn migrate_add_device_label(conn: &Connection) -> Result<(), Error> {
    let version = "20260312_0004_add_device_label";

    // Check if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // already applied
    }

    let conf_file = super::Config::config_file();
    let mut inserted = false;

    if conf_file.exists() {
        let content = fs::read_to_string(&conf_file).map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to read config {:?}: {}", conf_file, e)),
            )
        })?;

        if let Ok(mut yaml) = serde_yaml::from_str::<Value>(&content)
            && let Some(map) = yaml.as_mapping_mut()
        {
            let key = Value::String("device_label".to_string());

            if !map.contains_key(&key) {
                map.insert(key.clone(), Value::String("cli".to_string()));

                // Serialize updated YAML
                let serialized = serde_yaml::to_string(&yaml).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to serialize updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;

                // Inject documentation comment right after the `device_label` line
                let mut new_content = String::new();

                for line in serialized.lines() {
                    new_content.push_str(line);
                    new_content.push('\n');

                    if line.starts_with("device_label:") {
                        new_content.push_str(
                            "  # device_label is stored on every punch recorded\n\
                             #   from this machine, e.g. 'cli', 'front-desk-kiosk'\n",
                        );
                    }
                }

                fs::write(&conf_file, new_content).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to write updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;

                inserted = true;
            }
        }
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added device_label to config')",
        [version],
    )?;

    if inserted {
        success(format!(
            "Migration applied: {} → added device_label parameter to config.",
            version
        ));
    }

    Ok(())
}
