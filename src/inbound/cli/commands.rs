use crate::domain::inbox::DevicePlatform;
use crate::domain::team::TeamRole;
use crate::domain::workspace::{ProjectStatus, TaskPriority, TaskStatus};
use clap::{Args, Subcommand, ValueEnum};
use time::Date;
use time::macros::format_description;
use uuid::Uuid;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show the current subscription plan
    Subscription,
    #[command(subcommand)]
    Projects(ProjectCommands),
    #[command(subcommand)]
    Tasks(TaskCommands),
    #[command(subcommand)]
    Board(BoardCommands),
    #[command(subcommand)]
    Calendar(CalendarCommands),
    #[command(subcommand)]
    Team(TeamCommands),
    #[command(subcommand)]
    Notifications(NotificationCommands),
    #[command(subcommand)]
    Tags(TagCommands),
    #[command(subcommand)]
    Device(DeviceCommands),
}

impl Commands {
    /// Commands that can run without a valid session.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login { .. } | Self::Logout)
    }
}

//------------------------------------------------------------------------------
// Projects
//------------------------------------------------------------------------------

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ProjectCommands {
    List,
    Show {
        project_id: Uuid,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_date)]
        start: Option<Date>,
        #[arg(long, value_parser = parse_date)]
        end: Option<Date>,
        #[arg(long = "member")]
        members: Vec<Uuid>,
    },
    Update {
        project_id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = parse_date)]
        start: Option<Date>,
        #[arg(long, value_parser = parse_date)]
        end: Option<Date>,
        #[arg(long, value_enum)]
        status: Option<ProjectStatusArg>,
    },
    Delete {
        project_id: Uuid,
    },
    /// Align the project status with its tasks' progress
    Sync {
        project_id: Uuid,
    },
}

//------------------------------------------------------------------------------
// Tasks
//------------------------------------------------------------------------------

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(long, value_parser = parse_date)]
    pub due: Option<Date>,
    #[arg(long)]
    pub assignee: Option<Uuid>,
    #[arg(long = "tag")]
    pub tags: Vec<Uuid>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TaskCommands {
    List {
        #[arg(long)]
        project: Option<Uuid>,
    },
    Show {
        task_id: Uuid,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        project: Option<Uuid>,
        #[arg(long, value_enum, default_value_t = TaskStatusArg::Todo)]
        status: TaskStatusArg,
        #[command(flatten)]
        fields: TaskFields,
    },
    Update {
        task_id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, value_enum)]
        status: Option<TaskStatusArg>,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Change only the status of a task
    Status {
        task_id: Uuid,
        #[arg(value_enum)]
        status: TaskStatusArg,
    },
    Delete {
        task_id: Uuid,
    },
}

//------------------------------------------------------------------------------
// Board
//------------------------------------------------------------------------------

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BoardCommands {
    Show {
        project_id: Uuid,
    },
    /// Drag a card to a column, at the end unless an index is given
    Move {
        project_id: Uuid,
        task_id: Uuid,
        #[arg(value_enum)]
        status: TaskStatusArg,
        #[arg(long)]
        index: Option<usize>,
    },
}

//------------------------------------------------------------------------------
// Calendar
//------------------------------------------------------------------------------

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CalendarCommands {
    /// Agenda of one month, the current one by default
    Month {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: Option<u8>,
        #[arg(long)]
        project: Option<Uuid>,
    },
    /// Agenda of an arbitrary date range
    Range {
        #[arg(long, value_parser = parse_date)]
        from: Date,
        #[arg(long, value_parser = parse_date)]
        to: Date,
        #[arg(long)]
        project: Option<Uuid>,
    },
    /// Unfinished tasks past their due date
    Overdue {
        #[arg(long)]
        project: Option<Uuid>,
    },
}

//------------------------------------------------------------------------------
// Team
//------------------------------------------------------------------------------

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TeamCommands {
    Members,
    Remove {
        member_id: Uuid,
    },
    Invitations,
    Invite {
        email: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Member)]
        role: RoleArg,
        #[arg(long)]
        project: Option<Uuid>,
    },
    Accept {
        invitation_id: Uuid,
    },
    Decline {
        invitation_id: Uuid,
    },
    Cancel {
        invitation_id: Uuid,
    },
}

//------------------------------------------------------------------------------
// Notifications
//------------------------------------------------------------------------------

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum NotificationCommands {
    List {
        #[arg(long)]
        unread: bool,
    },
    /// Number of unread notifications
    Count,
    Read {
        notification_id: Uuid,
    },
    ReadAll,
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SettingsCommands {
    Show {
        settings_id: Uuid,
    },
    Update {
        settings_id: Uuid,
        #[arg(long)]
        push: Option<bool>,
        #[arg(long)]
        email: Option<bool>,
        #[arg(long)]
        task_reminders: Option<bool>,
        #[arg(long)]
        team_updates: Option<bool>,
        #[arg(long)]
        project_updates: Option<bool>,
    },
}

//------------------------------------------------------------------------------
// Tags & devices
//------------------------------------------------------------------------------

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TagCommands {
    List {
        project_id: Uuid,
    },
    Create {
        project_id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long)]
        color: String,
        #[arg(long)]
        icon: Option<String>,
    },
    Delete {
        tag_id: Uuid,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum DeviceCommands {
    /// Register a push token for this device
    Register {
        token: String,
        #[arg(long, value_enum)]
        platform: PlatformArg,
    },
    Unregister {
        token: String,
    },
}

//------------------------------------------------------------------------------
// Values
//------------------------------------------------------------------------------

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatusArg {
    Todo,
    InProgress,
    Done,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(value: TaskStatusArg) -> Self {
        match value {
            TaskStatusArg::Todo => Self::Todo,
            TaskStatusArg::InProgress => Self::InProgress,
            TaskStatusArg::Done => Self::Done,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatusArg {
    Ongoing,
    InProgress,
    Completed,
    Canceled,
}

impl From<ProjectStatusArg> for ProjectStatus {
    fn from(value: ProjectStatusArg) -> Self {
        match value {
            ProjectStatusArg::Ongoing => Self::Ongoing,
            ProjectStatusArg::InProgress => Self::InProgress,
            ProjectStatusArg::Completed => Self::Completed,
            ProjectStatusArg::Canceled => Self::Canceled,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for TaskPriority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Admin,
    Member,
    Viewer,
}

impl From<RoleArg> for TeamRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => Self::Admin,
            RoleArg::Member => Self::Member,
            RoleArg::Viewer => Self::Viewer,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformArg {
    Android,
    Ios,
    Web,
}

impl From<PlatformArg> for DevicePlatform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Android => Self::Android,
            PlatformArg::Ios => Self::Ios,
            PlatformArg::Web => Self::Web,
        }
    }
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|_| format!("'{value}' is not a YYYY-MM-DD date"))
}
