use super::punch_kind::PunchKind;
use serde::Serialize;

/// A worker's current clocked state. Never stored: always derived from the
/// kind of the chronologically-latest punch.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ClockStatus {
    ClockedOut,
    ClockedIn,
    OnBreak,
}

impl ClockStatus {
    /// Derivation rule: OUT or no punch at all → ClockedOut, IN or BREAK_END
    /// → ClockedIn, BREAK_START → OnBreak. No other record is consulted.
    pub fn from_last_kind(last: Option<PunchKind>) -> Self {
        match last {
            None | Some(PunchKind::Out) => ClockStatus::ClockedOut,
            Some(PunchKind::In) | Some(PunchKind::BreakEnd) => ClockStatus::ClockedIn,
            Some(PunchKind::BreakStart) => ClockStatus::OnBreak,
        }
    }

    /// Transition matrix of the punch state machine. Exactly four pairs are
    /// legal; everything else must be rejected at the write boundary.
    pub fn allows(&self, kind: PunchKind) -> bool {
        matches!(
            (self, kind),
            (ClockStatus::ClockedOut, PunchKind::In)
                | (ClockStatus::ClockedIn, PunchKind::Out)
                | (ClockStatus::ClockedIn, PunchKind::BreakStart)
                | (ClockStatus::OnBreak, PunchKind::BreakEnd)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClockStatus::ClockedOut => "Clocked Out",
            ClockStatus::ClockedIn => "Clocked In",
            ClockStatus::OnBreak => "On Break",
        }
    }

    /// Lowercase label used in error messages ("cannot record X while ...").
    pub fn describe(&self) -> &'static str {
        match self {
            ClockStatus::ClockedOut => "clocked out",
            ClockStatus::ClockedIn => "already clocked in",
            ClockStatus::OnBreak => "on break",
        }
    }

    pub fn is_working(&self) -> bool {
        matches!(self, ClockStatus::ClockedIn | ClockStatus::OnBreak)
    }
}
