use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("valid color regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    #[default]
    Pending,
    Ongoing,
    InProgress,
    Completed,
    Canceled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ongoing => "ongoing",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Todo => "To do",
            Self::InProgress => "In progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" | "basse" | "faible" => Self::Low,
            "high" | "haute" | "élevée" | "urgent" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The slice of a team member embedded in projects and task assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Date>,
    pub project_id: Option<Uuid>,
    pub assignee: Option<MemberSummary>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: ProjectStatus,
    pub members: Vec<MemberSummary>,
    pub tasks: Vec<Task>,
    pub tags: Vec<Tag>,
}

//------------------------------------------------------------------------------
// Validation
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Blank(&'static str),

    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: Date, end: Date },

    #[error("'{0}' is not a hex color")]
    InvalidColor(String),

    #[error("'{0}' is not an email address")]
    InvalidEmail(String),
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }

    Ok(())
}

pub(crate) fn require_date_order(
    start: Option<Date>,
    end: Option<Date>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end)
        && end < start
    {
        return Err(ValidationError::EndBeforeStart { start, end });
    }

    Ok(())
}

pub(crate) fn require_color(color: &str) -> Result<(), ValidationError> {
    if !HEX_COLOR.is_match(color) {
        return Err(ValidationError::InvalidColor(color.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_require_text() {
        assert_eq!(Ok(()), require_text("name", "Launch"));
        assert_eq!(
            Err(ValidationError::Blank("name")),
            require_text("name", "   ")
        );
    }

    #[test]
    fn test_require_date_order() {
        let day = Some(date!(2024 - 01 - 01));
        assert!(require_date_order(day, day).is_ok());
        assert!(require_date_order(None, Some(date!(2024 - 01 - 01))).is_ok());
        assert_eq!(
            Err(ValidationError::EndBeforeStart {
                start: date!(2024 - 02 - 01),
                end: date!(2024 - 01 - 01)
            }),
            require_date_order(Some(date!(2024 - 02 - 01)), Some(date!(2024 - 01 - 01)))
        );
    }

    #[test]
    fn test_require_color() {
        assert!(require_color("#fff").is_ok());
        assert!(require_color("#1A2b3C").is_ok());
        assert!(require_color("red").is_err());
        assert!(require_color("#12345").is_err());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(TaskPriority::High, TaskPriority::parse("HIGH"));
        assert_eq!(TaskPriority::Low, TaskPriority::parse("basse"));
        assert_eq!(TaskPriority::Medium, TaskPriority::parse(""));
    }
}
