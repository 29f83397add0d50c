use crate::domain::session::{Bearer, SessionError};
use crate::domain::team::{TeamInvitation, TeamMember, TeamRole};
use crate::domain::workspace::ValidationError;
use crate::outbound::rest::error::Error as BackendError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TeamService: Send + Sync {
    async fn get_members(&self) -> Result<Vec<TeamMember>, TeamError>;
    async fn remove_member(&self, member_id: Uuid) -> Result<(), TeamError>;
    async fn get_invitations(&self) -> Result<Vec<TeamInvitation>, TeamError>;
    async fn invite(&self, params: InviteParams) -> Result<TeamInvitation, TeamError>;
    async fn respond(&self, params: RespondParams) -> Result<TeamInvitation, TeamError>;
    async fn cancel_invitation(&self, invitation_id: Uuid) -> Result<(), TeamError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TeamApi: Send + Sync {
    async fn list_members(&self, bearer: Bearer) -> Result<Vec<TeamMember>, BackendError>;
    async fn remove_member(&self, bearer: Bearer, member_id: Uuid) -> Result<(), BackendError>;
    async fn list_invitations(&self, bearer: Bearer)
    -> Result<Vec<TeamInvitation>, BackendError>;
    async fn create_invitation(
        &self,
        bearer: Bearer,
        params: InviteParams,
    ) -> Result<TeamInvitation, BackendError>;
    async fn answer_invitation(
        &self,
        bearer: Bearer,
        invitation_id: Uuid,
        answer: InvitationAnswer,
    ) -> Result<TeamInvitation, BackendError>;
    async fn delete_invitation(
        &self,
        bearer: Bearer,
        invitation_id: Uuid,
    ) -> Result<(), BackendError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Params
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct InviteParams {
    pub email: String,
    pub role: TeamRole,
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationAnswer {
    Accept,
    Decline,
}

impl InvitationAnswer {
    pub fn as_path(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RespondParams {
    pub invitation_id: Uuid,
    pub answer: InvitationAnswer,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum TeamError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error("{0} is already a member of the team")]
    AlreadyMember(String),

    #[error("{0} already has a pending invitation")]
    AlreadyInvited(String),

    #[error("the invitation is no longer pending")]
    InvitationClosed,

    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    BackendError(BackendError),
}

impl From<BackendError> for TeamError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Unauthorized => Self::Unauthenticated,
            other => Self::BackendError(other),
        }
    }
}
