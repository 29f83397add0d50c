use crate::domain::inbox::{DeviceToken, InboxApi, Notification, NotificationSettings};
use crate::domain::session::Bearer;
use crate::outbound::rest::client::RestClient;
use crate::outbound::rest::error::Error;
use crate::outbound::rest::models::{DeviceTokenRequest, NotificationBody, SettingsBody};
use async_trait::async_trait;
use http::Method;
use uuid::Uuid;

#[async_trait]
impl InboxApi for RestClient {
    async fn list_notifications(&self, bearer: Bearer) -> Result<Vec<Notification>, Error> {
        let request = self.request(Method::GET, "notifications", Some(&bearer))?;
        let body: Vec<NotificationBody> = self.fetch(request).await?;

        Ok(body.into_iter().map(Into::into).collect())
    }

    async fn mark_read(&self, bearer: Bearer, notification_id: Uuid) -> Result<(), Error> {
        let path = format!("notifications/{notification_id}/read");
        let request = self.request(Method::PUT, &path, Some(&bearer))?;

        self.execute(request).await
    }

    async fn mark_all_read(&self, bearer: Bearer) -> Result<(), Error> {
        let request = self.request(Method::PUT, "notifications/read-all", Some(&bearer))?;

        self.execute(request).await
    }

    async fn find_settings(
        &self,
        bearer: Bearer,
        settings_id: Uuid,
    ) -> Result<NotificationSettings, Error> {
        let path = format!("notification-settings/{settings_id}");
        let request = self.request(Method::GET, &path, Some(&bearer))?;
        let body: SettingsBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn save_settings(
        &self,
        bearer: Bearer,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings, Error> {
        let path = format!("notification-settings/{}", settings.id);
        let request = self
            .request(Method::PUT, &path, Some(&bearer))?
            .json(&SettingsBody::from(settings));
        let body: SettingsBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn register_device(&self, bearer: Bearer, device: DeviceToken) -> Result<(), Error> {
        let request = self
            .request(Method::POST, "device-tokens", Some(&bearer))?
            .json(&DeviceTokenRequest::from(device));

        self.execute(request).await
    }

    async fn unregister_device(&self, bearer: Bearer, token: String) -> Result<(), Error> {
        let url = self.endpoint_with("device-tokens", &token)?;
        let request = self.request_url(Method::DELETE, url, Some(&bearer));

        self.execute(request).await
    }
}
