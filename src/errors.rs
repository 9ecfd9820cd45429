//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid punch type: {0}")]
    InvalidPunchKind(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid overtime status '{0}' (expected pending, approved or rejected)")]
    InvalidStatus(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // ---------------------------
    // Punch ledger errors
    // ---------------------------
    #[error("Illegal punch: cannot record '{attempted}' while {state}")]
    IllegalTransition {
        state: &'static str,
        attempted: &'static str,
    },

    #[error("No punch found with id {0}")]
    PunchNotFound(i64),

    #[error("Unknown worker: {0}")]
    WorkerNotFound(String),

    #[error("Unknown organization: {0}")]
    OrganizationNotFound(String),

    #[error("Worker '{worker}' does not belong to organization '{org}'")]
    WrongOrganization { worker: String, org: String },

    #[error("'{0}' is not authorized for this operation (requires manager or admin role)")]
    NotAuthorized(String),

    #[error("Photo capture is required to clock in (pass --photo FILE or --no-photo)")]
    PhotoRequired,

    // ---------------------------
    // Overtime errors
    // ---------------------------
    #[error("Invalid overtime request: {0}")]
    InvalidOvertimeRequest(String),

    #[error("No overtime request found with id {0}")]
    OvertimeNotFound(i64),

    #[error("Overtime request {id} was already resolved as '{status}'")]
    AlreadyResolved { id: i64, status: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
