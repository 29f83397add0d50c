use crate::core::application::ApplicationServices;
use crate::domain::auth::AuthService;
use crate::errors::{AppError, not_logged_in};

/// Guard run before every command that needs a session. Refreshes an
/// expired access token on the way.
pub async fn auth<S: ApplicationServices>(state: &S) -> Result<(), AppError> {
    let is_authenticated = state.auth_service().authenticated().await?;

    if !is_authenticated {
        return Err(not_logged_in());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::auth::{MockAuthService, ServiceAuthenticatedError};
    use crate::domain::session::SessionError;
    use crate::outbound::rest::error::Error as BackendError;
    use std::future;

    fn app_with(auth_service: MockAuthService) -> MockApplication {
        MockApplication::mock_instance(MockAppInstanceParameters {
            auth_service: Some(auth_service),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_authenticated() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(true))));

        assert!(auth(&app_with(auth_service)).await.is_ok());
    }

    #[tokio::test]
    async fn test_unauthenticated() {
        let mut auth_service = MockAuthService::new();
        auth_service
            .expect_authenticated()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(false))));

        let result = auth(&app_with(auth_service)).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_refresh_rejected() {
        let mut auth_service = MockAuthService::new();
        auth_service.expect_authenticated().times(1).returning(|| {
            Box::pin(future::ready(Err(ServiceAuthenticatedError::RefreshError(
                BackendError::Unauthorized,
            ))))
        });

        let result = auth(&app_with(auth_service)).await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_unreadable_session() {
        let mut auth_service = MockAuthService::new();
        auth_service.expect_authenticated().times(1).returning(|| {
            Box::pin(future::ready(Err(ServiceAuthenticatedError::SessionError(
                SessionError::ReadSessionError,
            ))))
        });

        let result = auth(&app_with(auth_service)).await;

        assert!(matches!(result, Err(AppError::Unauthorized(Some(_)))));
    }
}
