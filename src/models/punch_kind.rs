use serde::Serialize;

/// The four punch actions a worker can record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PunchKind {
    In,
    Out,
    BreakStart,
    BreakEnd,
}

impl PunchKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchKind::In => "in",
            PunchKind::Out => "out",
            PunchKind::BreakStart => "break_start",
            PunchKind::BreakEnd => "break_end",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in" => Some(PunchKind::In),
            "out" => Some(PunchKind::Out),
            "break_start" => Some(PunchKind::BreakStart),
            "break_end" => Some(PunchKind::BreakEnd),
            _ => None,
        }
    }

    /// Human label for tables and messages.
    pub fn label(&self) -> &'static str {
        match self {
            PunchKind::In => "Clock In",
            PunchKind::Out => "Clock Out",
            PunchKind::BreakStart => "Break Start",
            PunchKind::BreakEnd => "Break End",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, PunchKind::In)
    }
}
