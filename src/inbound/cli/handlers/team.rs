use crate::core::application::ApplicationServices;
use crate::domain::team::{InvitationAnswer, InviteParams, RespondParams, TeamService};
use crate::errors::AppError;
use crate::inbound::cli::responses::shared::MessageResponse;
use crate::inbound::cli::responses::team::{
    InvitationListResponse, InvitationResponse, MemberListResponse,
};
use time::OffsetDateTime;
use uuid::Uuid;

pub async fn list_members<S: ApplicationServices>(
    state: &S,
) -> Result<MemberListResponse, AppError> {
    let members = state.team_service().get_members().await?;

    Ok(members.into())
}

pub async fn remove_member<S: ApplicationServices>(
    state: &S,
    member_id: Uuid,
) -> Result<MessageResponse, AppError> {
    state.team_service().remove_member(member_id).await?;

    Ok(MessageResponse::new("Member removed"))
}

pub async fn list_invitations<S: ApplicationServices>(
    state: &S,
    now: OffsetDateTime,
) -> Result<InvitationListResponse, AppError> {
    let invitations = state.team_service().get_invitations().await?;

    Ok(InvitationListResponse::new(invitations, now))
}

pub async fn invite<S: ApplicationServices>(
    state: &S,
    params: InviteParams,
    now: OffsetDateTime,
) -> Result<InvitationResponse, AppError> {
    let invitation = state.team_service().invite(params).await?;

    Ok(InvitationResponse::new(invitation, now))
}

pub async fn respond<S: ApplicationServices>(
    state: &S,
    invitation_id: Uuid,
    answer: InvitationAnswer,
    now: OffsetDateTime,
) -> Result<InvitationResponse, AppError> {
    let invitation = state
        .team_service()
        .respond(RespondParams {
            invitation_id,
            answer,
        })
        .await?;

    Ok(InvitationResponse::new(invitation, now))
}

pub async fn cancel_invitation<S: ApplicationServices>(
    state: &S,
    invitation_id: Uuid,
) -> Result<MessageResponse, AppError> {
    state.team_service().cancel_invitation(invitation_id).await?;

    Ok(MessageResponse::new("Invitation canceled"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::team::{
        InvitationStatus, MockTeamService, TeamError, TeamInvitation, TeamRole,
    };
    use std::future;
    use time::macros::datetime;

    fn app_with(team_service: MockTeamService) -> MockApplication {
        MockApplication::mock_instance(MockAppInstanceParameters {
            team_service: Some(team_service),
            ..Default::default()
        })
    }

    fn invitation(expires_at: OffsetDateTime) -> TeamInvitation {
        TeamInvitation {
            id: Uuid::nil(),
            email: "grace@example.com".to_string(),
            role: TeamRole::Member,
            status: InvitationStatus::Pending,
            project_id: None,
            invited_by: Some("Ada".to_string()),
            created_at: None,
            expires_at: Some(expires_at),
        }
    }

    #[tokio::test]
    async fn test_lapsed_invitations_show_expired() {
        let mut team_service = MockTeamService::new();
        team_service.expect_get_invitations().times(1).returning(|| {
            Box::pin(future::ready(Ok(vec![invitation(datetime!(
                2024-03-01 00:00 UTC
            ))])))
        });

        let response = list_invitations(&app_with(team_service), datetime!(2024-03-02 00:00 UTC))
            .await
            .unwrap();

        assert!(response.to_string().contains("expired"));
    }

    #[tokio::test]
    async fn test_invite_already_member() {
        let mut team_service = MockTeamService::new();
        team_service.expect_invite().times(1).returning(|params| {
            Box::pin(future::ready(Err(TeamError::AlreadyMember(params.email))))
        });

        let result = invite(
            &app_with(team_service),
            InviteParams {
                email: "grace@example.com".to_string(),
                role: TeamRole::Member,
                project_id: None,
            },
            datetime!(2024-03-02 00:00 UTC),
        )
        .await;

        assert!(
            matches!(result, Err(AppError::Rejected(Some(ref m))) if m.contains("grace@example.com"))
        );
    }

    #[tokio::test]
    async fn test_accept_invitation() {
        let mut team_service = MockTeamService::new();
        team_service
            .expect_respond()
            .withf(|params| params.answer == InvitationAnswer::Accept)
            .times(1)
            .returning(|_| {
                let mut accepted = invitation(datetime!(2024-04-01 00:00 UTC));
                accepted.status = InvitationStatus::Accepted;
                Box::pin(future::ready(Ok(accepted)))
            });

        let response = respond(
            &app_with(team_service),
            Uuid::nil(),
            InvitationAnswer::Accept,
            datetime!(2024-03-02 00:00 UTC),
        )
        .await
        .unwrap();

        assert!(response.to_string().contains("accepted"));
    }
}
