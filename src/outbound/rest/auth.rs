use crate::domain::auth::{
    ApiLoginParams, ApiLoginResult, ApiRefreshParams, AuthApi, Profile, SessionTokens, Subscription,
};
use crate::domain::session::Bearer;
use crate::outbound::rest::client::RestClient;
use crate::outbound::rest::error::Error;
use crate::outbound::rest::models::{
    LoginRequest, ProfileBody, RefreshRequest, SubscriptionBody, TokenBody,
};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http::Method;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Assumed lifetime of an opaque refresh token the backend gives no expiry for.
const DEFAULT_REFRESH_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[async_trait]
impl AuthApi for RestClient {
    async fn login(&self, params: ApiLoginParams) -> Result<ApiLoginResult, Error> {
        let request = self
            .request(Method::POST, "auth/login", None)?
            .json(&LoginRequest {
                email: params.email,
                password: params.password,
            });
        let mut body: TokenBody = self.fetch(request).await?;

        let profile = match body.user.take() {
            Some(user) => user.into(),
            None => {
                let bearer = Bearer::new(body.access_token.clone());
                self.profile(bearer).await?
            }
        };

        Ok(ApiLoginResult {
            session_tokens: session_tokens(body, SystemTime::now()),
            profile,
        })
    }

    async fn refresh(&self, params: ApiRefreshParams) -> Result<SessionTokens, Error> {
        let request = self
            .request(Method::POST, "auth/refresh", None)?
            .json(&RefreshRequest {
                user_id: params.user_id,
                refresh_token: params.refresh_token,
            });
        let body: TokenBody = self.fetch(request).await?;

        Ok(session_tokens(body, SystemTime::now()))
    }

    async fn profile(&self, bearer: Bearer) -> Result<Profile, Error> {
        let request = self.request(Method::GET, "auth/me", Some(&bearer))?;
        let body: ProfileBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn subscription(&self, bearer: Bearer) -> Result<Subscription, Error> {
        let request = self.request(Method::GET, "subscriptions/me", Some(&bearer))?;

        match self.fetch::<SubscriptionBody>(request).await {
            Ok(body) => Ok(body.into()),
            // users who never subscribed have no record at all
            Err(Error::NotFound) => Ok(Subscription::free()),
            Err(err) => Err(err),
        }
    }
}

/// Expiry comes from `expiresIn` when the backend sends it, then from the
/// token's own `exp` claim. A lifetime that does not fit in a `SystemTime`
/// is ignored. An access token of unknown lifetime counts as already expired
/// so that the next command refreshes it.
fn session_tokens(body: TokenBody, now: SystemTime) -> SessionTokens {
    let access_token_expires_at = expiry(now, body.expires_in, &body.access_token)
        .unwrap_or(now);

    let refresh_token_expires_at = expiry(now, body.refresh_expires_in, &body.refresh_token)
        .or_else(|| now.checked_add(DEFAULT_REFRESH_LIFETIME))
        .unwrap_or(now);

    SessionTokens {
        access_token: body.access_token,
        refresh_token: body.refresh_token,
        access_token_expires_at,
        refresh_token_expires_at,
    }
}

fn expiry(now: SystemTime, expires_in: Option<u64>, token: &str) -> Option<SystemTime> {
    expires_in
        .and_then(|secs| now.checked_add(Duration::from_secs(secs)))
        .or_else(|| jwt_expiry(token).ok().and_then(from_unix))
}

#[derive(Debug, Deserialize)]
struct JWTClaims {
    exp: u64,
}

fn from_unix(secs: u64) -> Option<SystemTime> {
    UNIX_EPOCH.checked_add(Duration::from_secs(secs))
}

fn jwt_expiry(jwt: &str) -> Result<u64, Error> {
    let payload = jwt.split('.').nth(1).ok_or(Error::JWTDecodeError)?;
    let payload = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let payload = String::from_utf8(payload)?;
    let claims: JWTClaims = serde_json::from_str(payload.as_str())?;

    Ok(claims.exp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(claims: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    fn token_body(access_token: String, refresh_token: String) -> TokenBody {
        TokenBody {
            access_token,
            refresh_token,
            expires_in: None,
            refresh_expires_in: None,
            user: None,
        }
    }

    #[test]
    fn test_jwt_expiry() {
        assert_eq!(1_700_000_000, jwt_expiry(&jwt(r#"{"exp":1700000000}"#)).unwrap());
        assert!(matches!(jwt_expiry("opaque"), Err(Error::JWTDecodeError)));
        assert!(jwt_expiry(&jwt(r#"{"sub":"ada"}"#)).is_err());
    }

    #[test]
    fn test_session_tokens_prefer_expires_in() {
        let now = UNIX_EPOCH + Duration::from_secs(1_000);
        let mut body = token_body(jwt(r#"{"exp":5000}"#), "opaque".to_string());
        body.expires_in = Some(60);

        let tokens = session_tokens(body, now);

        assert_eq!(from_unix(1_060).unwrap(), tokens.access_token_expires_at);
        assert_eq!(now + DEFAULT_REFRESH_LIFETIME, tokens.refresh_token_expires_at);
    }

    #[test]
    fn test_session_tokens_from_claims() {
        let now = UNIX_EPOCH + Duration::from_secs(1_000);
        let body = token_body(jwt(r#"{"exp":5000}"#), jwt(r#"{"exp":9000}"#));

        let tokens = session_tokens(body, now);

        assert_eq!(from_unix(5_000).unwrap(), tokens.access_token_expires_at);
        assert_eq!(from_unix(9_000).unwrap(), tokens.refresh_token_expires_at);
    }

    #[test]
    fn test_opaque_access_token_counts_as_expired() {
        let now = UNIX_EPOCH + Duration::from_secs(1_000);

        let tokens = session_tokens(token_body("a".to_string(), "r".to_string()), now);

        assert_eq!(now, tokens.access_token_expires_at);
    }

    #[test]
    fn test_session_tokens_ignore_oversized_lifetimes() {
        let now = UNIX_EPOCH + Duration::from_secs(1_000);
        let mut body = token_body(jwt(r#"{"exp":5000}"#), jwt(&format!(r#"{{"exp":{}}}"#, u64::MAX)));
        body.expires_in = Some(u64::MAX);
        body.refresh_expires_in = Some(u64::MAX);

        let tokens = session_tokens(body, now);

        assert_eq!(from_unix(5_000).unwrap(), tokens.access_token_expires_at);
        assert_eq!(now + DEFAULT_REFRESH_LIFETIME, tokens.refresh_token_expires_at);
    }
}
