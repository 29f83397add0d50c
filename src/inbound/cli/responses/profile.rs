use crate::domain::auth::{Plan, Profile, Subscription, SubscriptionStatus};
use crate::inbound::cli::responses::shared::or_dash;
use serde::Serialize;
use std::fmt;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    id: Uuid,
    full_name: String,
    email: String,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
        }
    }
}

impl fmt::Display for ProfileResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>\nid: {}", self.full_name, self.email, self.id)
    }
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    plan: &'static str,
    status: &'static str,
    premium: bool,
    expires_at: Option<String>,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(value: Subscription) -> Self {
        Self {
            plan: match value.plan {
                Plan::Free => "free",
                Plan::Premium => "premium",
            },
            status: match value.status {
                SubscriptionStatus::Active => "active",
                SubscriptionStatus::Trialing => "trialing",
                SubscriptionStatus::Canceled => "canceled",
                SubscriptionStatus::Expired => "expired",
            },
            premium: value.is_premium(),
            expires_at: value
                .expires_at
                .and_then(|expires_at| expires_at.format(&Rfc3339).ok()),
        }
    }
}

impl fmt::Display for SubscriptionResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "plan: {} ({})\npremium features: {}\nexpires: {}",
            self.plan,
            self.status,
            if self.premium { "enabled" } else { "disabled" },
            or_dash(self.expires_at.as_deref())
        )
    }
}
