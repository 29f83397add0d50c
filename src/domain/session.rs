use crate::domain::auth::SessionTokens;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("error writing session")]
    WriteSessionError,

    #[error("error reading session")]
    ReadSessionError,

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJSONError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub session_tokens: SessionTokens,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
}

impl UserSession {
    pub fn bearer(&self) -> Bearer {
        Bearer::new(self.session_tokens.access_token.clone())
    }
}

/// Access token attached to every authenticated backend request.
#[derive(Clone, PartialEq, Eq)]
pub struct Bearer(String);

impl Bearer {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for Bearer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Bearer(***)")
    }
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SessionPort: Send + Sync {
    async fn write_user_session(&self, params: UserSession) -> Result<(), SessionError>;
    async fn get_user_session(&self) -> Result<Option<UserSession>, SessionError>;
    async fn flush(&self) -> Result<(), SessionError>;
}

/// Reads the bearer of the stored session, if somebody is logged in.
pub async fn current_bearer<S>(session: &S) -> Result<Option<Bearer>, SessionError>
where
    S: SessionPort + ?Sized,
{
    Ok(session
        .get_user_session()
        .await?
        .map(|user_session| user_session.bearer()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future;
    use std::time::SystemTime;

    fn user_session() -> UserSession {
        UserSession {
            session_tokens: SessionTokens {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                access_token_expires_at: SystemTime::UNIX_EPOCH,
                refresh_token_expires_at: SystemTime::UNIX_EPOCH,
            },
            user_id: Uuid::nil(),
            email: "ada@example.com".to_string(),
            full_name: None,
        }
    }

    #[test]
    fn test_bearer_debug_hides_token() {
        assert_eq!("Bearer(***)", format!("{:?}", Bearer::new("secret")));
    }

    #[tokio::test]
    async fn test_current_bearer() {
        let mut session = MockSessionPort::new();
        session
            .expect_get_user_session()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(Some(user_session())))));

        let bearer = current_bearer(&session).await.unwrap();

        assert_eq!(Some(Bearer::new("access")), bearer);
    }

    #[tokio::test]
    async fn test_current_bearer_logged_out() {
        let mut session = MockSessionPort::new();
        session
            .expect_get_user_session()
            .times(1)
            .return_once(|| Box::pin(future::ready(Ok(None))));

        let bearer = current_bearer(&session).await.unwrap();

        assert_eq!(None, bearer);
    }
}
