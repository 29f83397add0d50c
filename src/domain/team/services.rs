use crate::domain::session::{Bearer, SessionPort, current_bearer};
use crate::domain::team::{
    InvitationStatus, InviteParams, RespondParams, TeamApi, TeamError, TeamInvitation,
    TeamMember, TeamService, require_email,
};
use async_trait::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: TeamApi + Send + Sync + 'static,
{
    session: Arc<SESSION>,
    api: Arc<API>,
}

impl<SESSION, API> Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: TeamApi + Send + Sync + 'static,
{
    pub fn new(session: Arc<SESSION>, api: Arc<API>) -> Self {
        Self { session, api }
    }

    async fn bearer(&self) -> Result<Bearer, TeamError> {
        current_bearer(self.session.as_ref())
            .await?
            .ok_or(TeamError::Unauthenticated)
    }
}

#[async_trait]
impl<SESSION, API> TeamService for Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: TeamApi + Send + Sync + 'static,
{
    async fn get_members(&self) -> Result<Vec<TeamMember>, TeamError> {
        let bearer = self.bearer().await?;

        Ok(self.api.list_members(bearer).await?)
    }

    async fn remove_member(&self, member_id: Uuid) -> Result<(), TeamError> {
        let bearer = self.bearer().await?;
        self.api.remove_member(bearer, member_id).await?;

        Ok(())
    }

    async fn get_invitations(&self) -> Result<Vec<TeamInvitation>, TeamError> {
        let bearer = self.bearer().await?;

        Ok(self.api.list_invitations(bearer).await?)
    }

    async fn invite(&self, params: InviteParams) -> Result<TeamInvitation, TeamError> {
        require_email(&params.email)?;
        let email = params.email.trim().to_lowercase();
        let bearer = self.bearer().await?;

        let members = self.api.list_members(bearer.clone()).await?;
        if members
            .iter()
            .any(|member| member.email.eq_ignore_ascii_case(&email))
        {
            return Err(TeamError::AlreadyMember(email));
        }

        let now = OffsetDateTime::now_utc();
        let invitations = self.api.list_invitations(bearer.clone()).await?;
        if invitations.iter().any(|invitation| {
            invitation.email.eq_ignore_ascii_case(&email)
                && invitation.effective_status(now) == InvitationStatus::Pending
        }) {
            return Err(TeamError::AlreadyInvited(email));
        }

        tracing::debug!(email = email.as_str(), role = %params.role, "sending invitation");
        let invitation = self
            .api
            .create_invitation(bearer, InviteParams { email, ..params })
            .await?;

        Ok(invitation)
    }

    async fn respond(&self, params: RespondParams) -> Result<TeamInvitation, TeamError> {
        let bearer = self.bearer().await?;

        let now = OffsetDateTime::now_utc();
        let invitations = self.api.list_invitations(bearer.clone()).await?;
        if let Some(invitation) = invitations
            .iter()
            .find(|invitation| invitation.id == params.invitation_id)
            && invitation.effective_status(now) != InvitationStatus::Pending
        {
            return Err(TeamError::InvitationClosed);
        }

        let invitation = self
            .api
            .answer_invitation(bearer, params.invitation_id, params.answer)
            .await?;

        Ok(invitation)
    }

    async fn cancel_invitation(&self, invitation_id: Uuid) -> Result<(), TeamError> {
        let bearer = self.bearer().await?;
        self.api.delete_invitation(bearer, invitation_id).await?;

        Ok(())
    }
}
