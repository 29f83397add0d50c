use crate::core::application::ApplicationServices;
use crate::domain::auth::{AuthService, ServiceLoginParams};
use crate::errors::{AppError, bad_request};
use crate::inbound::cli::responses::profile::{ProfileResponse, SubscriptionResponse};
use crate::inbound::cli::responses::shared::MessageResponse;

pub async fn login<S: ApplicationServices>(
    state: &S,
    email: String,
    password: String,
) -> Result<ProfileResponse, AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(bad_request("email and password are required"));
    }

    let profile = state
        .auth_service()
        .login(ServiceLoginParams {
            email: email.trim().to_string(),
            password,
        })
        .await?;

    Ok(profile.into())
}

pub async fn logout<S: ApplicationServices>(state: &S) -> Result<MessageResponse, AppError> {
    state.auth_service().logout().await?;

    Ok(MessageResponse::new("Logged out"))
}

pub async fn whoami<S: ApplicationServices>(state: &S) -> Result<ProfileResponse, AppError> {
    let profile = state.auth_service().profile().await?;

    Ok(profile.into())
}

pub async fn subscription<S: ApplicationServices>(
    state: &S,
) -> Result<SubscriptionResponse, AppError> {
    let subscription = state.auth_service().subscription().await?;

    Ok(subscription.into())
}
