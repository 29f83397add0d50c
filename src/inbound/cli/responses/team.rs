use crate::domain::team::{TeamInvitation, TeamMember};
use crate::inbound::cli::responses::shared::or_dash;
use serde::Serialize;
use std::fmt;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct MemberBody {
    id: Uuid,
    full_name: String,
    email: String,
    role: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    members: Vec<MemberBody>,
}

impl From<Vec<TeamMember>> for MemberListResponse {
    fn from(value: Vec<TeamMember>) -> Self {
        Self {
            members: value
                .into_iter()
                .map(|member| MemberBody {
                    id: member.id,
                    full_name: member.full_name,
                    email: member.email,
                    role: member.role.as_str(),
                    status: member.status.as_str(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for MemberListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            return f.write_str("No team members.");
        }

        let lines: Vec<String> = self
            .members
            .iter()
            .map(|member| {
                format!(
                    "{}  {:<24} {:<28} {:<7} {}",
                    member.id, member.full_name, member.email, member.role, member.status
                )
            })
            .collect();
        f.write_str(&lines.join("\n"))
    }
}

#[derive(Debug, Serialize)]
pub struct InvitationBody {
    id: Uuid,
    email: String,
    role: &'static str,
    status: &'static str,
    project_id: Option<Uuid>,
    invited_by: Option<String>,
    expires_at: Option<String>,
}

impl InvitationBody {
    /// Uses the status as of `now`, so lapsed invitations show as expired.
    fn new(invitation: TeamInvitation, now: OffsetDateTime) -> Self {
        Self {
            status: invitation.effective_status(now).as_str(),
            id: invitation.id,
            email: invitation.email,
            role: invitation.role.as_str(),
            project_id: invitation.project_id,
            invited_by: invitation.invited_by,
            expires_at: invitation
                .expires_at
                .and_then(|expires_at| expires_at.format(&Rfc3339).ok()),
        }
    }
}

impl fmt::Display for InvitationBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<28} {:<7} {:<9} expires {}",
            self.id,
            self.email,
            self.role,
            self.status,
            or_dash(self.expires_at.as_deref())
        )
    }
}

#[derive(Debug, Serialize)]
pub struct InvitationListResponse {
    invitations: Vec<InvitationBody>,
}

impl InvitationListResponse {
    pub fn new(invitations: Vec<TeamInvitation>, now: OffsetDateTime) -> Self {
        Self {
            invitations: invitations
                .into_iter()
                .map(|invitation| InvitationBody::new(invitation, now))
                .collect(),
        }
    }
}

impl fmt::Display for InvitationListResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invitations.is_empty() {
            return f.write_str("No invitations.");
        }

        let lines: Vec<String> = self.invitations.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

#[derive(Debug, Serialize)]
pub struct InvitationResponse {
    invitation: InvitationBody,
}

impl InvitationResponse {
    pub fn new(invitation: TeamInvitation, now: OffsetDateTime) -> Self {
        Self {
            invitation: InvitationBody::new(invitation, now),
        }
    }
}

impl fmt::Display for InvitationResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.invitation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::{InvitationStatus, TeamRole};
    use time::macros::datetime;

    #[test]
    fn test_lapsed_invitation_shows_expired() {
        let invitation = TeamInvitation {
            id: Uuid::nil(),
            email: "grace@example.com".to_string(),
            role: TeamRole::Admin,
            status: InvitationStatus::Pending,
            project_id: None,
            invited_by: None,
            created_at: None,
            expires_at: Some(datetime!(2024-01-01 0:00 UTC)),
        };

        let response =
            InvitationListResponse::new(vec![invitation], datetime!(2024-02-01 0:00 UTC));

        assert_eq!("expired", response.invitations[0].status);
    }
}
