use serde::Serialize;

/// Access role carried by a worker. Only managers and above may resolve
/// overtime requests or correct punch times.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Role {
    Employee,
    Manager,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "employee" => Some(Role::Employee),
            "manager" => Some(Role::Manager),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Manager | Role::Admin | Role::SuperAdmin)
    }
}

/// Per-worker punch settings, refining the organization policy.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PunchSettings {
    pub allow_mobile: bool,
    pub track_gps: bool,
    pub exempt_from_auto_clock_out: bool,
}

impl Default for PunchSettings {
    fn default() -> Self {
        Self {
            allow_mobile: false,
            track_gps: true,
            exempt_from_auto_clock_out: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Worker {
    pub id: String,              // ⇔ workers.id
    pub org_id: String,          // ⇔ workers.org_id
    pub display_name: String,    // ⇔ workers.display_name
    pub role: Role,              // ⇔ workers.role
    pub settings: PunchSettings, // ⇔ workers.allow_mobile / track_gps / exempt_auto_clock_out
    pub created_at: String,      // ⇔ workers.created_at (TEXT, ISO8601)
}

impl Worker {
    pub fn is_exempt(&self) -> bool {
        self.settings.exempt_from_auto_clock_out
    }
}
