use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use std::fs;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(path: &str) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        println!("{}", content);
        Ok(())
    }

    /// Parse the file and report whether it is a valid configuration.
    pub fn check(path: &str) -> AppResult<()> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str::<crate::config::Config>(&content)
            .map_err(|e| AppError::Config(format!("invalid configuration: {e}")))?;
        success(format!("Configuration file '{}' is valid.", path));
        Ok(())
    }
}
