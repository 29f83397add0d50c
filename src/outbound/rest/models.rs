//! Wire shapes of the backend's JSON API and their conversion into domain
//! records. Status strings are normalized here, once, on the way in.

use crate::domain::auth::{Plan, Profile, Subscription, SubscriptionStatus};
use crate::domain::inbox::{DeviceToken, Notification, NotificationSettings, NotificationType};
use crate::domain::status::{normalize_project_status, normalize_task_status};
use crate::domain::team::{
    InvitationStatus, InviteParams, MemberStatus, TeamInvitation, TeamMember, TeamRole,
};
use crate::domain::workspace::{
    MemberSummary, Project, ProjectChanges, ProjectDraft, Tag, TagDraft, Task, TaskChanges,
    TaskDraft, TaskPriority,
};
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const DEFAULT_TAG_COLOR: &str = "#9e9e9e";

/// Accepts `YYYY-MM-DD` as well as full RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(timestamp) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(timestamp.date());
    }

    Date::parse(raw.get(..10)?, DATE_FORMAT).ok()
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

fn parse_optional_date(raw: Option<String>) -> Option<Date> {
    raw.as_deref().and_then(parse_date)
}

/// Payloads come either bare or wrapped in `{"data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(data) => data,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

//------------------------------------------------------------------------------
// Auth
//------------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub user_id: Uuid,
    pub refresh_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBody {
    #[serde(alias = "token")]
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<u64>,
    pub refresh_expires_in: Option<u64>,
    pub user: Option<ProfileBody>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    #[serde(alias = "name")]
    pub full_name: String,
    pub email: String,
}

impl From<ProfileBody> for Profile {
    fn from(value: ProfileBody) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionBody {
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

impl From<SubscriptionBody> for Subscription {
    fn from(value: SubscriptionBody) -> Self {
        let plan = match value.plan.as_deref().map(str::to_lowercase).as_deref() {
            Some("premium") | Some("pro") => Plan::Premium,
            _ => Plan::Free,
        };
        let status = match value.status.as_deref().map(str::to_lowercase).as_deref() {
            Some("trialing") | Some("trial") => SubscriptionStatus::Trialing,
            Some("canceled") | Some("cancelled") => SubscriptionStatus::Canceled,
            Some("expired") => SubscriptionStatus::Expired,
            _ => SubscriptionStatus::Active,
        };

        Self {
            plan,
            status,
            expires_at: value.expires_at,
        }
    }
}

//------------------------------------------------------------------------------
// Projects & tasks
//------------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

impl From<MemberBody> for MemberSummary {
    fn from(value: MemberBody) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub project_id: Option<Uuid>,
}

impl From<TagBody> for Tag {
    fn from(value: TagBody) -> Self {
        Self {
            id: value.id,
            name: value.name,
            color: value
                .color
                .unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
            icon: value.icon,
            project_id: value.project_id,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub project_id: Option<Uuid>,
    #[serde(default)]
    pub assignee: Option<MemberBody>,
    #[serde(default)]
    pub tags: Vec<TagBody>,
}

impl From<TaskBody> for Task {
    fn from(value: TaskBody) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            status: normalize_task_status(value.status.as_deref().unwrap_or_default()),
            priority: value
                .priority
                .as_deref()
                .map(TaskPriority::parse)
                .unwrap_or_default(),
            due_date: parse_optional_date(value.due_date),
            project_id: value.project_id,
            assignee: value.assignee.map(Into::into),
            tags: value.tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub members: Vec<MemberBody>,
    #[serde(default)]
    pub tasks: Vec<TaskBody>,
    #[serde(default)]
    pub tags: Vec<TagBody>,
}

impl From<ProjectBody> for Project {
    fn from(value: ProjectBody) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            start_date: parse_optional_date(value.start_date),
            end_date: parse_optional_date(value.end_date),
            status: normalize_project_status(value.status.as_deref().unwrap_or_default()),
            members: value.members.into_iter().map(Into::into).collect(),
            tasks: value.tasks.into_iter().map(Into::into).collect(),
            tags: value.tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_ids: Option<Vec<Uuid>>,
}

impl From<ProjectDraft> for ProjectRequest {
    fn from(value: ProjectDraft) -> Self {
        Self {
            name: Some(value.name),
            description: value.description,
            start_date: value.start_date.map(format_date),
            end_date: value.end_date.map(format_date),
            status: Some(value.status.as_str()),
            member_ids: Some(value.member_ids),
        }
    }
}

impl From<ProjectChanges> for ProjectRequest {
    fn from(value: ProjectChanges) -> Self {
        Self {
            name: value.name,
            description: value.description,
            start_date: value.start_date.map(format_date),
            end_date: value.end_date.map(format_date),
            status: value.status.map(|status| status.as_str()),
            member_ids: None,
        }
    }
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<Uuid>>,
}

impl From<TaskDraft> for TaskRequest {
    fn from(value: TaskDraft) -> Self {
        Self {
            title: Some(value.title),
            description: value.description,
            status: Some(value.status.as_str()),
            priority: Some(value.priority.as_str()),
            due_date: value.due_date.map(format_date),
            project_id: value.project_id,
            assignee_id: value.assignee_id,
            tag_ids: Some(value.tag_ids),
        }
    }
}

impl From<TaskChanges> for TaskRequest {
    fn from(value: TaskChanges) -> Self {
        Self {
            title: value.title,
            description: value.description,
            status: value.status.map(|status| status.as_str()),
            priority: value.priority.map(|priority| priority.as_str()),
            due_date: value.due_date.map(format_date),
            project_id: None,
            assignee_id: value.assignee_id,
            tag_ids: value.tag_ids,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRequest {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl From<TagDraft> for TagRequest {
    fn from(value: TagDraft) -> Self {
        Self {
            name: value.name,
            color: value.color,
            icon: value.icon,
        }
    }
}

//------------------------------------------------------------------------------
// Team
//------------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    #[serde(alias = "name")]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<TeamMemberBody> for TeamMember {
    fn from(value: TeamMemberBody) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
            role: value.role.as_deref().map(TeamRole::parse).unwrap_or_default(),
            status: value
                .status
                .as_deref()
                .map(MemberStatus::parse)
                .unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub project_id: Option<Uuid>,
    #[serde(default)]
    pub invited_by: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

impl From<InvitationBody> for TeamInvitation {
    fn from(value: InvitationBody) -> Self {
        Self {
            id: value.id,
            email: value.email,
            role: value.role.as_deref().map(TeamRole::parse).unwrap_or_default(),
            status: value
                .status
                .as_deref()
                .map(InvitationStatus::parse)
                .unwrap_or_default(),
            project_id: value.project_id,
            invited_by: value.invited_by,
            created_at: value.created_at,
            expires_at: value.expires_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationRequest {
    pub email: String,
    pub role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Uuid>,
}

impl From<InviteParams> for InvitationRequest {
    fn from(value: InviteParams) -> Self {
        Self {
            email: value.email,
            role: value.role.as_str(),
            project_id: value.project_id,
        }
    }
}

//------------------------------------------------------------------------------
// Notifications
//------------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl From<NotificationBody> for Notification {
    fn from(value: NotificationBody) -> Self {
        Self {
            id: value.id,
            kind: NotificationType::parse(&value.kind),
            read: value.read,
            data: value.data,
            created_at: value.created_at,
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsBody {
    #[serde(alias = "_id")]
    pub id: Uuid,
    #[serde(default = "enabled")]
    pub push_enabled: bool,
    #[serde(default = "enabled")]
    pub email_enabled: bool,
    #[serde(default = "enabled")]
    pub task_reminders: bool,
    #[serde(default = "enabled")]
    pub team_updates: bool,
    #[serde(default = "enabled")]
    pub project_updates: bool,
}

fn enabled() -> bool {
    true
}

impl From<SettingsBody> for NotificationSettings {
    fn from(value: SettingsBody) -> Self {
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

impl From<NotificationSettings> for SettingsBody {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTokenRequest {
    pub token: String,
    pub platform: &'static str,
}

impl From<DeviceToken> for DeviceTokenRequest {
    fn from(value: DeviceToken) -> Self {
        Self {
            token: value.token,
            platform: value.platform.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workspace::{ProjectStatus, TaskStatus};
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn test_parse_date() {
        assert_eq!(Some(date!(2024 - 05 - 01)), parse_date("2024-05-01"));
        assert_eq!(
            Some(date!(2024 - 05 - 01)),
            parse_date("2024-05-01T22:30:00.000Z")
        );
        assert_eq!(Some(date!(2024 - 05 - 01)), parse_date("2024-05-01 10:00"));
        assert_eq!(None, parse_date("next week"));
        assert_eq!(None, parse_date(""));
    }

    #[test]
    fn test_project_body_normalizes_statuses() {
        let body: ProjectBody = serde_json::from_value(json!({
            "_id": "0b6b4bde-08a4-4f4e-9a8b-4d7a1c1e0f01",
            "name": "Website",
            "status": "Terminé",
            "startDate": "2024-01-10T00:00:00Z",
            "tasks": [{
                "id": "0b6b4bde-08a4-4f4e-9a8b-4d7a1c1e0f02",
                "title": "Deploy",
                "status": "En cours",
                "priority": "HIGH",
                "dueDate": "2024-02-01"
            }]
        }))
        .unwrap();

        let project = Project::from(body);

        assert_eq!(ProjectStatus::Completed, project.status);
        assert_eq!(Some(date!(2024 - 01 - 10)), project.start_date);
        assert_eq!(None, project.end_date);
        assert_eq!(TaskStatus::InProgress, project.tasks[0].status);
        assert_eq!(TaskPriority::High, project.tasks[0].priority);
        assert_eq!(Some(date!(2024 - 02 - 01)), project.tasks[0].due_date);
    }

    #[test]
    fn test_project_body_missing_status_is_pending() {
        let body: ProjectBody = serde_json::from_value(json!({
            "id": "0b6b4bde-08a4-4f4e-9a8b-4d7a1c1e0f01",
            "name": "Website"
        }))
        .unwrap();

        assert_eq!(ProjectStatus::Pending, Project::from(body).status);
    }

    #[test]
    fn test_envelope() {
        let wrapped: Envelope<Vec<TagBody>> = serde_json::from_value(json!({
            "data": [{"id": "0b6b4bde-08a4-4f4e-9a8b-4d7a1c1e0f03", "name": "bug"}]
        }))
        .unwrap();
        let tags: Vec<Tag> = wrapped.into_inner().into_iter().map(Into::into).collect();
        assert_eq!(DEFAULT_TAG_COLOR, tags[0].color);

        let bare: Envelope<NotificationBody> = serde_json::from_value(json!({
            "id": "0b6b4bde-08a4-4f4e-9a8b-4d7a1c1e0f04",
            "type": "task_assigned",
            "data": {"taskId": "x"}
        }))
        .unwrap();
        let notification = Notification::from(bare.into_inner());
        assert_eq!(NotificationType::TaskAssigned, notification.kind);
        assert_eq!(json!({"taskId": "x"}), notification.data);
    }

    #[test]
    fn test_project_changes_skip_unset_fields() {
        let request = ProjectRequest::from(ProjectChanges::status(ProjectStatus::InProgress));

        assert_eq!(
            json!({"status": "in_progress"}),
            serde_json::to_value(request).unwrap()
        );
    }

    #[test]
    fn test_task_draft_request() {
        let request = TaskRequest::from(TaskDraft {
            title: "Deploy".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Low,
            due_date: Some(date!(2024 - 02 - 01)),
            project_id: None,
            assignee_id: None,
            tag_ids: vec![],
        });

        assert_eq!(
            json!({
                "title": "Deploy",
                "status": "todo",
                "priority": "low",
                "dueDate": "2024-02-01",
                "tagIds": []
            }),
            serde_json::to_value(request).unwrap()
        );
    }
}
