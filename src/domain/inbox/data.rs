use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    TaskAssigned,
    TaskUpdated,
    TaskCompleted,
    TaskDueSoon,
    TaskOverdue,
    TeamInvitation,
    TeamInvitationAccepted,
    TeamMemberJoined,
    ProjectUpdated,
    ProjectCompleted,
    ProjectDeadline,
    Unknown,
}

impl NotificationType {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "task_assigned" => Self::TaskAssigned,
            "task_updated" => Self::TaskUpdated,
            "task_completed" => Self::TaskCompleted,
            "task_due_soon" => Self::TaskDueSoon,
            "task_overdue" => Self::TaskOverdue,
            "team_invitation" => Self::TeamInvitation,
            "team_invitation_accepted" => Self::TeamInvitationAccepted,
            "team_member_joined" => Self::TeamMemberJoined,
            "project_updated" => Self::ProjectUpdated,
            "project_completed" => Self::ProjectCompleted,
            "project_deadline" => Self::ProjectDeadline,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskUpdated => "task_updated",
            Self::TaskCompleted => "task_completed",
            Self::TaskDueSoon => "task_due_soon",
            Self::TaskOverdue => "task_overdue",
            Self::TeamInvitation => "team_invitation",
            Self::TeamInvitationAccepted => "team_invitation_accepted",
            Self::TeamMemberJoined => "team_member_joined",
            Self::ProjectUpdated => "project_updated",
            Self::ProjectCompleted => "project_completed",
            Self::ProjectDeadline => "project_deadline",
            Self::Unknown => "unknown",
        }
    }

    pub fn category(&self) -> NotificationCategory {
        match self {
            Self::TaskAssigned
            | Self::TaskUpdated
            | Self::TaskCompleted
            | Self::TaskDueSoon
            | Self::TaskOverdue => NotificationCategory::Task,
            Self::TeamInvitation | Self::TeamInvitationAccepted | Self::TeamMemberJoined => {
                NotificationCategory::Team
            }
            Self::ProjectUpdated | Self::ProjectCompleted | Self::ProjectDeadline => {
                NotificationCategory::Project
            }
            Self::Unknown => NotificationCategory::Other,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Task,
    Team,
    Project,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationType,
    pub read: bool,
    pub data: serde_json::Value,
    pub created_at: Option<OffsetDateTime>,
}

impl Notification {
    /// Human readable line built from the payload, falling back to the type.
    pub fn summary(&self) -> String {
        ["message", "title", "body"]
            .iter()
            .find_map(|key| self.data.get(*key).and_then(|value| value.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| self.kind.as_str().replace('_', " "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub id: Uuid,
    pub push_enabled: bool,
    pub email_enabled: bool,
    pub task_reminders: bool,
    pub team_updates: bool,
    pub project_updates: bool,
}

impl NotificationSettings {
    /// Whether a push for this notification type should reach the device.
    pub fn allows(&self, kind: NotificationType) -> bool {
        if !self.push_enabled {
            return false;
        }

        match kind.category() {
            NotificationCategory::Task => self.task_reminders,
            NotificationCategory::Team => self.team_updates,
            NotificationCategory::Project => self.project_updates,
            NotificationCategory::Other => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePlatform {
    Android,
    Ios,
    Web,
}

impl DevicePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Web => "web",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceToken {
    pub token: String,
    pub platform: DevicePlatform,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings() -> NotificationSettings {
        NotificationSettings {
            id: Uuid::nil(),
            push_enabled: true,
            email_enabled: false,
            task_reminders: true,
            team_updates: false,
            project_updates: true,
        }
    }

    #[test]
    fn test_parse_unknown_type() {
        assert_eq!(NotificationType::TaskDueSoon, NotificationType::parse("TASK_DUE_SOON"));
        assert_eq!(NotificationType::Unknown, NotificationType::parse("billing_event"));
    }

    #[test]
    fn test_allows() {
        let settings = settings();

        assert!(settings.allows(NotificationType::TaskAssigned));
        assert!(!settings.allows(NotificationType::TeamInvitation));
        assert!(settings.allows(NotificationType::Unknown));

        let muted = NotificationSettings {
            push_enabled: false,
            ..settings
        };
        assert!(!muted.allows(NotificationType::TaskAssigned));
    }

    #[test]
    fn test_summary() {
        let mut notification = Notification {
            id: Uuid::nil(),
            kind: NotificationType::TaskAssigned,
            read: false,
            data: json!({"title": "Review the roadmap"}),
            created_at: None,
        };
        assert_eq!("Review the roadmap", notification.summary());

        notification.data = json!({});
        assert_eq!("task assigned", notification.summary());
    }
}
