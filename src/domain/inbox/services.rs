use crate::domain::inbox::{
    DeviceToken, InboxApi, InboxError, InboxService, Notification, NotificationSettings,
    UpdateSettingsParams,
};
use crate::domain::session::{Bearer, SessionPort, current_bearer};
use crate::domain::workspace::require_text;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: InboxApi + Send + Sync + 'static,
{
    session: Arc<SESSION>,
    api: Arc<API>,
}

impl<SESSION, API> Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: InboxApi + Send + Sync + 'static,
{
    pub fn new(session: Arc<SESSION>, api: Arc<API>) -> Self {
        Self { session, api }
    }

    async fn bearer(&self) -> Result<Bearer, InboxError> {
        current_bearer(self.session.as_ref())
            .await?
            .ok_or(InboxError::Unauthenticated)
    }
}

#[async_trait]
impl<SESSION, API> InboxService for Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: InboxApi + Send + Sync + 'static,
{
    async fn get_notifications(&self, unread_only: bool) -> Result<Vec<Notification>, InboxError> {
        let bearer = self.bearer().await?;
        let mut notifications = self.api.list_notifications(bearer).await?;

        if unread_only {
            notifications.retain(|notification| !notification.read);
        }
        // newest first; undated entries sink to the bottom
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(notifications)
    }

    async fn unread_count(&self) -> Result<usize, InboxError> {
        Ok(self.get_notifications(true).await?.len())
    }

    async fn mark_read(&self, notification_id: Uuid) -> Result<(), InboxError> {
        let bearer = self.bearer().await?;
        self.api.mark_read(bearer, notification_id).await?;

        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), InboxError> {
        let bearer = self.bearer().await?;
        self.api.mark_all_read(bearer).await?;

        Ok(())
    }

    async fn get_settings(&self, settings_id: Uuid) -> Result<NotificationSettings, InboxError> {
        let bearer = self.bearer().await?;

        Ok(self.api.find_settings(bearer, settings_id).await?)
    }

    async fn update_settings(
        &self,
        params: UpdateSettingsParams,
    ) -> Result<NotificationSettings, InboxError> {
        let bearer = self.bearer().await?;
        let current = self
            .api
            .find_settings(bearer.clone(), params.settings_id)
            .await?;
        let updated = params.apply(current.clone());

        if updated == current {
            return Ok(current);
        }

        Ok(self.api.save_settings(bearer, updated).await?)
    }

    async fn register_device(&self, device: DeviceToken) -> Result<(), InboxError> {
        require_text("device token", &device.token)?;
        let bearer = self.bearer().await?;
        tracing::debug!(platform = device.platform.as_str(), "registering device token");
        self.api.register_device(bearer, device).await?;

        Ok(())
    }

    async fn unregister_device(&self, token: String) -> Result<(), InboxError> {
        require_text("device token", &token)?;
        let bearer = self.bearer().await?;
        self.api.unregister_device(bearer, token).await?;

        Ok(())
    }
}
