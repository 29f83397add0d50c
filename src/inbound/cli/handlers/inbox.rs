use crate::core::application::ApplicationServices;
use crate::domain::inbox::{DeviceToken, InboxService, UpdateSettingsParams};
use crate::errors::AppError;
use crate::inbound::cli::responses::inbox::{
    NotificationListResponse, SettingsResponse, UnreadCountResponse,
};
use crate::inbound::cli::responses::shared::MessageResponse;
use uuid::Uuid;

pub async fn list_notifications<S: ApplicationServices>(
    state: &S,
    unread_only: bool,
) -> Result<NotificationListResponse, AppError> {
    let notifications = state
        .inbox_service()
        .get_notifications(unread_only)
        .await?;

    Ok(notifications.into())
}

pub async fn unread_count<S: ApplicationServices>(
    state: &S,
) -> Result<UnreadCountResponse, AppError> {
    let unread = state.inbox_service().unread_count().await?;

    Ok(UnreadCountResponse::new(unread))
}

pub async fn mark_read<S: ApplicationServices>(
    state: &S,
    notification_id: Uuid,
) -> Result<MessageResponse, AppError> {
    state.inbox_service().mark_read(notification_id).await?;

    Ok(MessageResponse::new("Marked as read"))
}

pub async fn mark_all_read<S: ApplicationServices>(
    state: &S,
) -> Result<MessageResponse, AppError> {
    state.inbox_service().mark_all_read().await?;

    Ok(MessageResponse::new("All notifications marked as read"))
}

pub async fn show_settings<S: ApplicationServices>(
    state: &S,
    settings_id: Uuid,
) -> Result<SettingsResponse, AppError> {
    let settings = state.inbox_service().get_settings(settings_id).await?;

    Ok(settings.into())
}

pub async fn update_settings<S: ApplicationServices>(
    state: &S,
    params: UpdateSettingsParams,
) -> Result<SettingsResponse, AppError> {
    let settings = state.inbox_service().update_settings(params).await?;

    Ok(settings.into())
}

pub async fn register_device<S: ApplicationServices>(
    state: &S,
    device: DeviceToken,
) -> Result<MessageResponse, AppError> {
    let platform = device.platform;
    state.inbox_service().register_device(device).await?;

    Ok(MessageResponse::new(format!(
        "Registered {} device",
        platform.as_str()
    )))
}

pub async fn unregister_device<S: ApplicationServices>(
    state: &S,
    token: String,
) -> Result<MessageResponse, AppError> {
    state.inbox_service().unregister_device(token).await?;

    Ok(MessageResponse::new("Device unregistered"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::inbox::{
        DevicePlatform, InboxError, MockInboxService, Notification, NotificationSettings,
        NotificationType,
    };
    use crate::domain::workspace::ValidationError;
    use serde_json::json;
    use std::future;

    fn app_with(inbox_service: MockInboxService) -> MockApplication {
        MockApplication::mock_instance(MockAppInstanceParameters {
            inbox_service: Some(inbox_service),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_list_unread_notifications() {
        let mut inbox_service = MockInboxService::new();
        inbox_service
            .expect_get_notifications()
            .withf(|unread_only| *unread_only)
            .times(1)
            .returning(|_| {
                Box::pin(future::ready(Ok(vec![Notification {
                    id: Uuid::nil(),
                    kind: NotificationType::TaskAssigned,
                    read: false,
                    data: json!({"message": "You were assigned Deploy"}),
                    created_at: None,
                }])))
            });

        let response = list_notifications(&app_with(inbox_service), true)
            .await
            .unwrap();

        assert!(response.to_string().starts_with("1 unread"));
        assert!(response.to_string().contains("You were assigned Deploy"));
    }

    #[tokio::test]
    async fn test_unread_count() {
        let mut inbox_service = MockInboxService::new();
        inbox_service
            .expect_unread_count()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(4))));

        let response = unread_count(&app_with(inbox_service)).await.unwrap();

        assert_eq!("4", response.to_string());
    }

    #[tokio::test]
    async fn test_update_settings() {
        let mut inbox_service = MockInboxService::new();
        inbox_service
            .expect_update_settings()
            .withf(|params| params.push_enabled == Some(false) && params.email_enabled.is_none())
            .times(1)
            .returning(|params| {
                Box::pin(future::ready(Ok(NotificationSettings {
                    id: params.settings_id,
                    push_enabled: false,
                    email_enabled: true,
                    task_reminders: true,
                    team_updates: true,
                    project_updates: true,
                })))
            });

        let response = update_settings(
            &app_with(inbox_service),
            UpdateSettingsParams {
                settings_id: Uuid::nil(),
                push_enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(response.to_string().starts_with("push: off\nemail: on"));
    }

    #[tokio::test]
    async fn test_register_blank_token() {
        let mut inbox_service = MockInboxService::new();
        inbox_service.expect_register_device().times(1).returning(|_| {
            Box::pin(future::ready(Err(InboxError::ValidationError(
                ValidationError::Blank("device token"),
            ))))
        });

        let result = register_device(
            &app_with(inbox_service),
            DeviceToken {
                token: " ".to_string(),
                platform: DevicePlatform::Android,
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(Some(_)))));
    }
}
