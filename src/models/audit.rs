use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a punch's audit trail. The trail is append-only: every
/// authorized time correction pushes a new entry holding the value being
/// replaced, so the original timestamp is never lost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub editor_id: String,
    pub editor_name: String,
    pub change_reason: String,
    pub previous_punch_time: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        editor_id: &str,
        editor_name: &str,
        change_reason: &str,
        previous_punch_time: DateTime<Utc>,
        edited_at: DateTime<Utc>,
    ) -> Self {
        Self {
            editor_id: editor_id.to_string(),
            editor_name: editor_name.to_string(),
            change_reason: change_reason.to_string(),
            previous_punch_time,
            edited_at,
        }
    }
}
