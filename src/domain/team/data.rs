use crate::domain::workspace::ValidationError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use time::OffsetDateTime;
use uuid::Uuid;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamRole {
    Owner,
    Admin,
    #[default]
    Member,
    Viewer,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "owner" | "propriétaire" => Self::Owner,
            "admin" | "administrator" | "administrateur" => Self::Admin,
            "viewer" | "guest" | "lecteur" | "invité" => Self::Viewer,
            _ => Self::Member,
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MemberStatus {
    #[default]
    Active,
    Pending,
    Inactive,
}

impl MemberStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" | "en attente" => Self::Pending,
            "inactive" | "disabled" | "inactif" => Self::Inactive,
            _ => Self::Active,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvitationStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl InvitationStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "accepted" | "acceptée" | "accepte" => Self::Accepted,
            "declined" | "rejected" | "refusée" | "refuse" => Self::Declined,
            "expired" | "expirée" => Self::Expired,
            _ => Self::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: TeamRole,
    pub status: MemberStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamInvitation {
    pub id: Uuid,
    pub email: String,
    pub role: TeamRole,
    pub status: InvitationStatus,
    pub project_id: Option<Uuid>,
    pub invited_by: Option<String>,
    pub created_at: Option<OffsetDateTime>,
    pub expires_at: Option<OffsetDateTime>,
}

impl TeamInvitation {
    /// A pending invitation past its expiry date is treated as expired even
    /// before the backend sweeps it.
    pub fn effective_status(&self, now: OffsetDateTime) -> InvitationStatus {
        match (self.status, self.expires_at) {
            (InvitationStatus::Pending, Some(expires_at)) if expires_at <= now => {
                InvitationStatus::Expired
            }
            (status, _) => status,
        }
    }
}

pub(crate) fn require_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL.is_match(email.trim()) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn invitation(status: InvitationStatus, expires_at: Option<OffsetDateTime>) -> TeamInvitation {
        TeamInvitation {
            id: Uuid::nil(),
            email: "grace@example.com".to_string(),
            role: TeamRole::Member,
            status,
            project_id: None,
            invited_by: None,
            created_at: None,
            expires_at,
        }
    }

    #[test]
    fn test_effective_status() {
        let now = datetime!(2024-06-01 12:00 UTC);

        assert_eq!(
            InvitationStatus::Expired,
            invitation(InvitationStatus::Pending, Some(datetime!(2024-05-31 0:00 UTC)))
                .effective_status(now)
        );
        assert_eq!(
            InvitationStatus::Pending,
            invitation(InvitationStatus::Pending, Some(datetime!(2024-06-02 0:00 UTC)))
                .effective_status(now)
        );
        assert_eq!(
            InvitationStatus::Accepted,
            invitation(InvitationStatus::Accepted, Some(datetime!(2024-05-31 0:00 UTC)))
                .effective_status(now)
        );
        assert_eq!(
            InvitationStatus::Pending,
            invitation(InvitationStatus::Pending, None).effective_status(now)
        );
    }

    #[test]
    fn test_require_email() {
        assert!(require_email("grace@example.com").is_ok());
        assert!(require_email(" grace@example.com ").is_ok());
        assert!(require_email("grace").is_err());
        assert!(require_email("grace@example").is_err());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(TeamRole::Admin, TeamRole::parse("Administrateur"));
        assert_eq!(TeamRole::Viewer, TeamRole::parse("guest"));
        assert_eq!(TeamRole::Member, TeamRole::parse("anything"));
    }
}
