use crate::domain::auth::{Profile, SessionTokens, Subscription};
use crate::domain::session::{Bearer, SessionError};
use crate::outbound::rest::error::Error as BackendError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AuthService: Send + Sync {
    async fn login(&self, params: ServiceLoginParams) -> Result<Profile, ServiceLoginError>;
    async fn logout(&self) -> Result<(), ServiceLogoutError>;
    async fn authenticated(&self) -> Result<bool, ServiceAuthenticatedError>;
    async fn profile(&self) -> Result<Profile, ServiceProfileError>;
    async fn subscription(&self) -> Result<Subscription, ServiceProfileError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AuthApi: Send + Sync {
    async fn login(&self, params: ApiLoginParams) -> Result<ApiLoginResult, BackendError>;
    async fn refresh(&self, params: ApiRefreshParams) -> Result<SessionTokens, BackendError>;
    async fn profile(&self, bearer: Bearer) -> Result<Profile, BackendError>;
    async fn subscription(&self, bearer: Bearer) -> Result<Subscription, BackendError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ServiceLoginParams {
    pub email: String,
    pub password: String,
}

pub struct ApiLoginParams {
    pub email: String,
    pub password: String,
}

pub struct ApiRefreshParams {
    pub user_id: Uuid,
    pub refresh_token: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Results
////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ApiLoginResult {
    pub session_tokens: SessionTokens,
    pub profile: Profile,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum ServiceLoginError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    BackendError(BackendError),
}

impl From<BackendError> for ServiceLoginError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Unauthorized => Self::InvalidCredentials,
            other => Self::BackendError(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceLogoutError {
    #[error(transparent)]
    SessionError(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum ServiceAuthenticatedError {
    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    RefreshError(#[from] BackendError),
}

#[derive(Debug, Error)]
pub enum ServiceProfileError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    BackendError(BackendError),
}

impl From<BackendError> for ServiceProfileError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Unauthorized => Self::Unauthenticated,
            other => Self::BackendError(other),
        }
    }
}
