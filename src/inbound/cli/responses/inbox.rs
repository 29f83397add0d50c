use crate::domain::inbox::{Notification, NotificationSettings};
use serde::Serialize;
use std::fmt;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct NotificationBody {
    id: Uuid,
    #[serde(rename = "type")]
    kind: &'static str,
    read: bool,
    summary: String,
    created_at: Option<String>,
}

impl From<Notification> for NotificationBody {
    fn from(value: Notification) -> Self {
        Self {
            summary: value.summary(),
            id: value.id,
            kind: value.kind.as_str(),
            read: value.read,
            created_at: value
                .created_at
                .and_then(|created_at| created_at.format(&Rfc3339).ok()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    unread: usize,
    notifications: Vec<NotificationBody>,
}

impl From<Vec<Notification>> for NotificationListResponse {
    fn from(value: Vec<Notification>) -> Self {
        Self {
            unread: value.iter().filter(|notification| !notification.read).count(),
            notifications: value.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for NotificationListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.notifications.is_empty() {
            return f.write_str("No notifications.");
        }

        write!(f, "{} unread", self.unread)?;
        for notification in &self.notifications {
            write!(
                f,
                "\n{} {}  {}",
                if notification.read { " " } else { "*" },
                notification.id,
                notification.summary
            )?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    unread: usize,
}

impl UnreadCountResponse {
    pub fn new(unread: usize) -> Self {
        Self { unread }
    }
}

impl fmt::Display for UnreadCountResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unread)
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    id: Uuid,
    push_enabled: bool,
    email_enabled: bool,
    task_reminders: bool,
    team_updates: bool,
    project_updates: bool,
}

impl From<NotificationSettings> for SettingsResponse {
    fn from(value: NotificationSettings) -> Self {
        Self {
            id: value.id,
            push_enabled: value.push_enabled,
            email_enabled: value.email_enabled,
            task_reminders: value.task_reminders,
            team_updates: value.team_updates,
            project_updates: value.project_updates,
        }
    }
}

impl fmt::Display for SettingsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toggle = |enabled: bool| if enabled { "on" } else { "off" };

        write!(
            f,
            "push: {}\nemail: {}\ntask reminders: {}\nteam updates: {}\nproject updates: {}",
            toggle(self.push_enabled),
            toggle(self.email_enabled),
            toggle(self.task_reminders),
            toggle(self.team_updates),
            toggle(self.project_updates)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inbox::NotificationType;
    use serde_json::json;

    #[test]
    fn test_unread_marker() {
        let response = NotificationListResponse::from(vec![
            Notification {
                id: Uuid::nil(),
                kind: NotificationType::TeamInvitation,
                read: false,
                data: json!({"message": "Ada invited you"}),
                created_at: None,
            },
            Notification {
                id: Uuid::nil(),
                kind: NotificationType::TaskCompleted,
                read: true,
                data: json!({}),
                created_at: None,
            },
        ]);

        let text = response.to_string();

        assert!(text.starts_with("1 unread"));
        assert!(text.contains("* 00000000-0000-0000-0000-000000000000  Ada invited you"));
        assert!(text.contains("task completed"));
    }
}
