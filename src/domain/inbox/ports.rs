use crate::domain::inbox::{DeviceToken, Notification, NotificationSettings};
use crate::domain::session::{Bearer, SessionError};
use crate::domain::workspace::ValidationError;
use crate::outbound::rest::error::Error as BackendError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait InboxService: Send + Sync {
    async fn get_notifications(&self, unread_only: bool) -> Result<Vec<Notification>, InboxError>;
    async fn unread_count(&self) -> Result<usize, InboxError>;
    async fn mark_read(&self, notification_id: Uuid) -> Result<(), InboxError>;
    async fn mark_all_read(&self) -> Result<(), InboxError>;
    async fn get_settings(&self, settings_id: Uuid) -> Result<NotificationSettings, InboxError>;
    async fn update_settings(
        &self,
        params: UpdateSettingsParams,
    ) -> Result<NotificationSettings, InboxError>;
    async fn register_device(&self, device: DeviceToken) -> Result<(), InboxError>;
    async fn unregister_device(&self, token: String) -> Result<(), InboxError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait InboxApi: Send + Sync {
    async fn list_notifications(&self, bearer: Bearer) -> Result<Vec<Notification>, BackendError>;
    async fn mark_read(&self, bearer: Bearer, notification_id: Uuid) -> Result<(), BackendError>;
    async fn mark_all_read(&self, bearer: Bearer) -> Result<(), BackendError>;
    async fn find_settings(
        &self,
        bearer: Bearer,
        settings_id: Uuid,
    ) -> Result<NotificationSettings, BackendError>;
    async fn save_settings(
        &self,
        bearer: Bearer,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, BackendError>;
    async fn register_device(&self, bearer: Bearer, device: DeviceToken)
    -> Result<(), BackendError>;
    async fn unregister_device(&self, bearer: Bearer, token: String) -> Result<(), BackendError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Toggles to change; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSettingsParams {
    pub settings_id: Uuid,
    pub push_enabled: Option<bool>,
    pub email_enabled: Option<bool>,
    pub task_reminders: Option<bool>,
    pub team_updates: Option<bool>,
    pub project_updates: Option<bool>,
}

impl UpdateSettingsParams {
    pub fn apply(&self, settings: NotificationSettings) -> NotificationSettings {
        NotificationSettings {
            id: settings.id,
            push_enabled: self.push_enabled.unwrap_or(settings.push_enabled),
            email_enabled: self.email_enabled.unwrap_or(settings.email_enabled),
            task_reminders: self.task_reminders.unwrap_or(settings.task_reminders),
            team_updates: self.team_updates.unwrap_or(settings.team_updates),
            project_updates: self.project_updates.unwrap_or(settings.project_updates),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum InboxError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    BackendError(BackendError),
}

impl From<BackendError> for InboxError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Unauthorized => Self::Unauthenticated,
            other => Self::BackendError(other),
        }
    }
}
