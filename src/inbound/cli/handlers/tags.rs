use crate::core::application::ApplicationServices;
use crate::domain::workspace::{CreateTagParams, WorkspaceService};
use crate::errors::AppError;
use crate::inbound::cli::responses::shared::MessageResponse;
use crate::inbound::cli::responses::tag::{TagListResponse, TagResponse};
use uuid::Uuid;

pub async fn list_tags<S: ApplicationServices>(
    state: &S,
    project_id: Uuid,
) -> Result<TagListResponse, AppError> {
    let tags = state.workspace_service().get_tags(project_id).await?;

    Ok(tags.into())
}

pub async fn create_tag<S: ApplicationServices>(
    state: &S,
    params: CreateTagParams,
) -> Result<TagResponse, AppError> {
    let tag = state.workspace_service().create_tag(params).await?;

    Ok(tag.into())
}

pub async fn delete_tag<S: ApplicationServices>(
    state: &S,
    tag_id: Uuid,
) -> Result<MessageResponse, AppError> {
    state.workspace_service().delete_tag(tag_id).await?;

    Ok(MessageResponse::new("Tag deleted"))
}
