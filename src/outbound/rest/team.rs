use crate::domain::session::Bearer;
use crate::domain::team::{InvitationAnswer, InviteParams, TeamApi, TeamInvitation, TeamMember};
use crate::outbound::rest::client::RestClient;
use crate::outbound::rest::error::Error;
use crate::outbound::rest::models::{InvitationBody, InvitationRequest, TeamMemberBody};
use async_trait::async_trait;
use http::Method;
use uuid::Uuid;

#[async_trait]
impl TeamApi for RestClient {
    async fn list_members(&self, bearer: Bearer) -> Result<Vec<TeamMember>, Error> {
        let request = self.request(Method::GET, "team/members", Some(&bearer))?;
        let body: Vec<TeamMemberBody> = self.fetch(request).await?;

        Ok(body.into_iter().map(Into::into).collect())
    }

    async fn remove_member(&self, bearer: Bearer, member_id: Uuid) -> Result<(), Error> {
        let path = format!("team/members/{member_id}");
        let request = self.request(Method::DELETE, &path, Some(&bearer))?;

        self.execute(request).await
    }

    async fn list_invitations(&self, bearer: Bearer) -> Result<Vec<TeamInvitation>, Error> {
        let request = self.request(Method::GET, "team/invitations", Some(&bearer))?;
        let body: Vec<InvitationBody> = self.fetch(request).await?;

        Ok(body.into_iter().map(Into::into).collect())
    }

    async fn create_invitation(
        &self,
        bearer: Bearer,
        params: InviteParams,
    ) -> Result<TeamInvitation, Error> {
        let request = self
            .request(Method::POST, "team/invitations", Some(&bearer))?
            .json(&InvitationRequest::from(params));
        let body: InvitationBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn answer_invitation(
        &self,
        bearer: Bearer,
        invitation_id: Uuid,
        answer: InvitationAnswer,
    ) -> Result<TeamInvitation, Error> {
        let path = format!("team/invitations/{invitation_id}/{}", answer.as_path());
        let request = self.request(Method::POST, &path, Some(&bearer))?;
        let body: InvitationBody = self.fetch(request).await?;

        Ok(body.into())
    }

    async fn delete_invitation(&self, bearer: Bearer, invitation_id: Uuid) -> Result<(), Error> {
        let path = format!("team/invitations/{invitation_id}");
        let request = self.request(Method::DELETE, &path, Some(&bearer))?;

        self.execute(request).await
    }
}
