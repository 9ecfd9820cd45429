use crate::export::ExportFormat;
use crate::models::punch_kind::PunchKind;
use crate::models::worker::Role;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for rTimeclock
/// CLI application for team punch clocks backed by SQLite
#[derive(Parser)]
#[command(
    name = "rtimeclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A team time clock CLI: punch in and out, track sessions and overtime using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Punch action names accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    In,
    Out,
    BreakStart,
    BreakEnd,
}

impl KindArg {
    pub fn to_kind(self) -> PunchKind {
        match self {
            KindArg::In => PunchKind::In,
            KindArg::Out => PunchKind::Out,
            KindArg::BreakStart => PunchKind::BreakStart,
            KindArg::BreakEnd => PunchKind::BreakEnd,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    Employee,
    Manager,
    Admin,
    SuperAdmin,
}

impl RoleArg {
    pub fn to_role(self) -> Role {
        match self {
            RoleArg::Employee => Role::Employee,
            RoleArg::Manager => Role::Manager,
            RoleArg::Admin => Role::Admin,
            RoleArg::SuperAdmin => Role::SuperAdmin,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check that the configuration file parses")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage organizations
    Org {
        #[command(subcommand)]
        action: OrgAction,
    },

    /// Manage workers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Record a punch (in, out, break-start, break-end)
    Punch {
        /// Punch action to record
        #[arg(value_enum)]
        kind: KindArg,

        #[arg(long, short = 'w', help = "Worker id (default: config default_worker)")]
        worker: Option<String>,

        #[arg(long, short = 'c', help = "Free-text note stored with the punch")]
        comment: Option<String>,

        /// Photo file captured for this punch (JPEG)
        #[arg(long, value_name = "FILE", conflicts_with = "no_photo")]
        photo: Option<String>,

        /// Punch without a photo even if the organization requires one
        #[arg(long = "no-photo")]
        no_photo: bool,

        /// Latitude of the punch position (with --lng)
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude of the punch position (with --lat)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,

        #[arg(long, help = "Device label stored on the punch (default: config device_label)")]
        device: Option<String>,
    },

    /// Show the current clock status
    Status {
        #[arg(long, short = 'w', conflicts_with = "team")]
        worker: Option<String>,

        /// Show every worker of the organization
        #[arg(long)]
        team: bool,

        #[arg(long, help = "Organization id (default: config default_org)")]
        org: Option<String>,

        /// Refresh the status line in place until interrupted
        #[arg(long, conflicts_with = "team")]
        watch: bool,

        /// Coarse elapsed display (hours and minutes, 60s refresh)
        #[arg(long)]
        coarse: bool,
    },

    /// Force-punch OUT everyone still clocked in past the cutoff
    Sweep {
        #[arg(long, help = "Organization id (default: config default_org)")]
        org: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Sweep date (default: today)")]
        date: Option<String>,
    },

    /// Correct the recorded time of a punch (audited)
    Edit {
        /// Punch id to correct
        punch_id: i64,

        #[arg(
            long,
            value_name = "YYYY-MM-DD HH:MM[:SS]",
            help = "New punch time, local timezone"
        )]
        time: String,

        #[arg(long, help = "Why the time is being corrected")]
        reason: String,

        #[arg(long, help = "Worker id of the manager making the correction")]
        editor: String,
    },

    /// File, resolve and review overtime requests
    Overtime {
        #[command(subcommand)]
        action: OvertimeAction,
    },

    /// List recent punches of a worker
    List {
        #[arg(long, short = 'w', help = "Worker id (default: config default_worker)")]
        worker: Option<String>,

        #[arg(
            long,
            short = 'p',
            help = "Filter by year/month/day or a range (YYYY, YYYY-MM, YYYY-MM-DD, START:END)"
        )]
        period: Option<String>,

        #[arg(long, short = 'n', default_value_t = 20, help = "Punches shown without --period")]
        limit: usize,
    },

    /// Export punch records
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (absolute path required)")]
        file: String,

        #[arg(
            long,
            short = 'p',
            value_name = "PERIOD",
            help = "Filter by year/month/day or a range; omit for everything"
        )]
        period: Option<String>,

        #[arg(long, short = 'w', help = "Restrict the export to one worker")]
        worker: Option<String>,

        #[arg(long, help = "Organization id (default: config default_org)")]
        org: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}

#[derive(Subcommand)]
pub enum OrgAction {
    /// Register a new organization
    Add {
        /// Organization id
        id: String,

        #[arg(long, help = "Display name (default: the id)")]
        name: Option<String>,

        #[arg(long = "photo-on-punch", help = "Require a photo when clocking in")]
        photo_on_punch: bool,

        #[arg(long = "gps", help = "Capture GPS coordinates on punches")]
        gps: bool,

        #[arg(
            long = "auto-out",
            value_name = "HH:MM",
            help = "Daily auto clock-out cutoff wall time"
        )]
        auto_out: Option<String>,
    },

    /// Change settings of an organization
    Set {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "photo-on-punch", conflicts_with = "no_photo_on_punch")]
        photo_on_punch: bool,

        #[arg(long = "no-photo-on-punch")]
        no_photo_on_punch: bool,

        #[arg(long = "gps", conflicts_with = "no_gps")]
        gps: bool,

        #[arg(long = "no-gps")]
        no_gps: bool,

        #[arg(long = "auto-out", value_name = "HH:MM", conflicts_with = "no_auto_out")]
        auto_out: Option<String>,

        #[arg(long = "no-auto-out", help = "Disable the daily auto clock-out")]
        no_auto_out: bool,
    },

    /// Show one organization
    Show { id: String },

    /// List all organizations
    List,
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Register a new worker
    Add {
        /// Worker id
        id: String,

        #[arg(long, help = "Organization id (default: config default_org)")]
        org: Option<String>,

        #[arg(long, help = "Display name (default: the id)")]
        name: Option<String>,

        #[arg(long, value_enum, default_value = "employee")]
        role: RoleArg,

        #[arg(long, help = "Allow punches from mobile devices")]
        mobile: bool,

        #[arg(long = "no-gps", help = "Never record GPS for this worker")]
        no_gps: bool,

        #[arg(long, help = "Exempt from the daily auto clock-out sweep")]
        exempt: bool,
    },

    /// Change settings of a worker
    Set {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_enum)]
        role: Option<RoleArg>,

        #[arg(long, conflicts_with = "no_mobile")]
        mobile: bool,

        #[arg(long = "no-mobile")]
        no_mobile: bool,

        #[arg(long = "gps", conflicts_with = "no_gps")]
        gps: bool,

        #[arg(long = "no-gps")]
        no_gps: bool,

        #[arg(long, conflicts_with = "no_exempt")]
        exempt: bool,

        #[arg(long = "no-exempt")]
        no_exempt: bool,
    },

    /// List workers of an organization
    List {
        #[arg(long, help = "Organization id (default: config default_org)")]
        org: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum OvertimeAction {
    /// File a new overtime request (starts pending)
    File {
        #[arg(long, short = 'w', help = "Worker id (default: config default_worker)")]
        worker: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Date the overtime is worked")]
        date: String,

        #[arg(long, value_name = "HH:MM")]
        start: String,

        #[arg(long, value_name = "HH:MM")]
        end: String,

        #[arg(long, help = "Requested hours (as claimed, not derived)")]
        hours: f64,

        #[arg(long, help = "Why the overtime is needed")]
        reason: String,
    },

    /// Approve or reject a pending request (managers only)
    Resolve {
        /// Request id
        id: i64,

        #[arg(long, conflicts_with = "reject")]
        approve: bool,

        #[arg(long)]
        reject: bool,

        #[arg(long, help = "Worker id of the resolving manager")]
        approver: String,
    },

    /// List overtime requests
    List {
        #[arg(long, short = 'w', help = "Only this worker's requests")]
        worker: Option<String>,

        #[arg(long, help = "Organization id (default: config default_org)")]
        org: Option<String>,

        #[arg(long, help = "Filter by status: pending, approved or rejected")]
        status: Option<String>,
    },

    /// Aggregate statistics over requests
    Stats {
        #[arg(long, short = 'w', help = "Only this worker's requests")]
        worker: Option<String>,

        #[arg(long, help = "Organization id (default: config default_org)")]
        org: Option<String>,
    },
}
