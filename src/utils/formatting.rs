//! Formatting utilities used for CLI and export outputs.

use crate::models::overtime::OvertimeStatus;
use crate::models::punch_kind::PunchKind;
use crate::models::status::ClockStatus;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn italic(s: &str) -> String {
    format!("\x1b[3m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Fractional hours rendered for overtime listings, e.g. "3.00 h".
pub fn fmt_hours(hours: f64) -> String {
    format!("{:.2} h", hours)
}

/// Label and ANSI color for a punch kind, used by tables and exports.
pub fn describe_kind(kind: PunchKind) -> (String, &'static str) {
    match kind {
        PunchKind::In => ("Clock In".into(), "\x1b[32m"),
        PunchKind::Out => ("Clock Out".into(), "\x1b[31m"),
        PunchKind::BreakStart => ("Break Start".into(), "\x1b[33m"),
        PunchKind::BreakEnd => ("Break End".into(), "\x1b[36m"),
    }
}

/// Label and ANSI color for a derived clock status.
pub fn describe_status(status: ClockStatus) -> (String, &'static str) {
    match status {
        ClockStatus::ClockedIn => ("Clocked In".into(), "\x1b[32m"),
        ClockStatus::OnBreak => ("On Break".into(), "\x1b[33m"),
        ClockStatus::ClockedOut => ("Clocked Out".into(), "\x1b[90m"),
    }
}

/// Label and ANSI color for an overtime request status.
pub fn describe_overtime_status(status: OvertimeStatus) -> (String, &'static str) {
    match status {
        OvertimeStatus::Pending => ("Pending".into(), "\x1b[33m"),
        OvertimeStatus::Approved => ("Approved".into(), "\x1b[32m"),
        OvertimeStatus::Rejected => ("Rejected".into(), "\x1b[31m"),
    }
}
