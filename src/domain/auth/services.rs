use crate::domain::auth::{
    ApiLoginParams, ApiRefreshParams, AuthApi, AuthService, Profile, ServiceAuthenticatedError,
    ServiceLoginError, ServiceLoginParams, ServiceLogoutError, ServiceProfileError, Subscription,
};
use crate::domain::session::{SessionPort, UserSession, current_bearer};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: AuthApi + Send + Sync + 'static,
{
    session: Arc<SESSION>,
    api: Arc<API>,
}

impl<SESSION, API> Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: AuthApi + Send + Sync + 'static,
{
    pub fn new(session: Arc<SESSION>, api: Arc<API>) -> Self {
        Self { session, api }
    }
}

#[async_trait]
impl<SESSION, API> AuthService for Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: AuthApi + Send + Sync + 'static,
{
    async fn login(&self, params: ServiceLoginParams) -> Result<Profile, ServiceLoginError> {
        tracing::debug!(email = params.email.as_str(), "logging in");
        let login = self
            .api
            .login(ApiLoginParams {
                email: params.email,
                password: params.password,
            })
            .await?;

        // never mix the tokens of two accounts
        self.session.flush().await?;

        self.session
            .write_user_session(UserSession {
                session_tokens: login.session_tokens,
                user_id: login.profile.id,
                email: login.profile.email.clone(),
                full_name: Some(login.profile.full_name.clone()),
            })
            .await?;
        tracing::debug!("wrote session");

        Ok(login.profile)
    }

    async fn logout(&self) -> Result<(), ServiceLogoutError> {
        self.session.flush().await?;

        Ok(())
    }

    async fn authenticated(&self) -> Result<bool, ServiceAuthenticatedError> {
        if let Some(user_session) = self.session.get_user_session().await? {
            if user_session.session_tokens.refresh_token_expired() {
                self.session.flush().await?;

                return Ok(false);
            }

            if user_session.session_tokens.access_token_expired() {
                tracing::debug!("access token expired, refreshing");
                let session_tokens = self
                    .api
                    .refresh(ApiRefreshParams {
                        user_id: user_session.user_id,
                        refresh_token: user_session.session_tokens.refresh_token.clone(),
                    })
                    .await?;

                self.session
                    .write_user_session(UserSession {
                        session_tokens,
                        ..user_session
                    })
                    .await?;
            }
        } else {
            return Ok(false);
        }

        Ok(true)
    }

    async fn profile(&self) -> Result<Profile, ServiceProfileError> {
        let bearer = current_bearer(self.session.as_ref())
            .await?
            .ok_or(ServiceProfileError::Unauthenticated)?;

        Ok(self.api.profile(bearer).await?)
    }

    async fn subscription(&self) -> Result<Subscription, ServiceProfileError> {
        let bearer = current_bearer(self.session.as_ref())
            .await?
            .ok_or(ServiceProfileError::Unauthenticated)?;

        Ok(self.api.subscription(bearer).await?)
    }
}
