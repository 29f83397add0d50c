use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expires_at: SystemTime,
    pub refresh_token_expires_at: SystemTime,
}

impl SessionTokens {
    pub fn access_token_expired(&self) -> bool {
        self.access_token_expires_at < SystemTime::now()
    }

    pub fn refresh_token_expired(&self) -> bool {
        self.refresh_token_expires_at < SystemTime::now()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Free,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    Canceled,
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub expires_at: Option<OffsetDateTime>,
}

impl Subscription {
    pub fn free() -> Self {
        Self {
            plan: Plan::Free,
            status: SubscriptionStatus::Active,
            expires_at: None,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.plan == Plan::Premium
            && matches!(
                self.status,
                SubscriptionStatus::Active | SubscriptionStatus::Trialing
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn session_token_unexpired() -> SessionTokens {
        SessionTokens {
            access_token: "".to_string(),
            refresh_token: "".to_string(),
            access_token_expires_at: SystemTime::now() + Duration::from_secs(300),
            refresh_token_expires_at: SystemTime::now() + Duration::from_secs(300),
        }
    }

    fn session_token_expired() -> SessionTokens {
        SessionTokens {
            access_token: "".to_string(),
            refresh_token: "".to_string(),
            access_token_expires_at: SystemTime::UNIX_EPOCH,
            refresh_token_expires_at: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_refresh_token_expired_unexpired() {
        assert_eq!(false, session_token_unexpired().refresh_token_expired());
    }

    #[test]
    fn test_refresh_token_expired_expired() {
        assert_eq!(true, session_token_expired().refresh_token_expired());
    }

    #[test]
    fn test_access_token_expired() {
        assert_eq!(false, session_token_unexpired().access_token_expired());
        assert_eq!(true, session_token_expired().access_token_expired());
    }

    #[test]
    fn test_is_premium() {
        let mut subscription = Subscription {
            plan: Plan::Premium,
            status: SubscriptionStatus::Trialing,
            expires_at: None,
        };
        assert!(subscription.is_premium());

        subscription.status = SubscriptionStatus::Expired;
        assert!(!subscription.is_premium());

        assert!(!Subscription::free().is_premium());
    }
}
