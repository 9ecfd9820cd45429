pub mod backup;
pub mod config;
pub mod db;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod org;
pub mod overtime;
pub mod punch;
pub mod status;
pub mod sweep;
pub mod worker;
