pub mod backup;
pub mod capture;
pub mod config;
pub mod log;
pub mod overtime;
pub mod punch;
pub mod session;
pub mod status;
pub mod sweep;
