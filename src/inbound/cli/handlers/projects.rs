use crate::core::application::ApplicationServices;
use crate::domain::workspace::{CreateProjectParams, UpdateProjectParams, WorkspaceService};
use crate::errors::AppError;
use crate::inbound::cli::responses::project::{
    ProjectListResponse, ProjectResponse, StatusSyncResponse,
};
use crate::inbound::cli::responses::shared::MessageResponse;
use uuid::Uuid;

pub async fn list_projects<S: ApplicationServices>(
    state: &S,
) -> Result<ProjectListResponse, AppError> {
    let projects = state.workspace_service().get_projects().await?;

    Ok(projects.into())
}

pub async fn show_project<S: ApplicationServices>(
    state: &S,
    project_id: Uuid,
) -> Result<ProjectResponse, AppError> {
    let project = state.workspace_service().get_project(project_id).await?;

    Ok(project.into())
}

pub async fn create_project<S: ApplicationServices>(
    state: &S,
    params: CreateProjectParams,
) -> Result<ProjectResponse, AppError> {
    let project = state.workspace_service().create_project(params).await?;

    Ok(project.into())
}

pub async fn update_project<S: ApplicationServices>(
    state: &S,
    params: UpdateProjectParams,
) -> Result<ProjectResponse, AppError> {
    let project = state.workspace_service().update_project(params).await?;

    Ok(project.into())
}

pub async fn delete_project<S: ApplicationServices>(
    state: &S,
    project_id: Uuid,
) -> Result<MessageResponse, AppError> {
    state.workspace_service().delete_project(project_id).await?;

    Ok(MessageResponse::new("Project deleted"))
}

pub async fn sync_project<S: ApplicationServices>(
    state: &S,
    project_id: Uuid,
) -> Result<StatusSyncResponse, AppError> {
    let result = state
        .workspace_service()
        .sync_project_status(project_id)
        .await?;

    Ok(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::status::StatusUpdate;
    use crate::domain::workspace::{
        MockWorkspaceService, Project, ProjectStatus, SyncProjectStatusResult, ValidationError,
        WorkspaceError,
    };
    use crate::outbound::rest::error::Error as BackendError;
    use std::future;

    fn app_with(workspace_service: MockWorkspaceService) -> MockApplication {
        MockApplication::mock_instance(MockAppInstanceParameters {
            workspace_service: Some(workspace_service),
            ..Default::default()
        })
    }

    fn project(status: ProjectStatus) -> Project {
        Project {
            id: Uuid::nil(),
            name: "Website".to_string(),
            description: Some("Relaunch".to_string()),
            start_date: None,
            end_date: None,
            status,
            members: vec![],
            tasks: vec![],
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_list_projects() {
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service
            .expect_get_projects()
            .times(1)
            .returning(|| Box::pin(future::ready(Ok(vec![project(ProjectStatus::Ongoing)]))));

        let response = list_projects(&app_with(workspace_service)).await.unwrap();

        assert!(response.to_string().contains("Website"));
    }

    #[tokio::test]
    async fn test_show_missing_project() {
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service.expect_get_project().times(1).returning(|_| {
            Box::pin(future::ready(Err(WorkspaceError::BackendError(
                BackendError::NotFound,
            ))))
        });

        let result = show_project(&app_with(workspace_service), Uuid::nil()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_project_validation() {
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service.expect_create_project().times(1).returning(|_| {
            Box::pin(future::ready(Err(WorkspaceError::ValidationError(
                ValidationError::Blank("project name"),
            ))))
        });

        let result = create_project(
            &app_with(workspace_service),
            CreateProjectParams {
                name: " ".to_string(),
                description: None,
                start_date: None,
                end_date: None,
                member_ids: vec![],
            },
        )
        .await;

        assert!(
            matches!(result, Err(AppError::BadRequest(Some(ref m))) if m == "project name must not be empty")
        );
    }

    #[tokio::test]
    async fn test_sync_project() {
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service
            .expect_sync_project_status()
            .times(1)
            .returning(|_| {
                Box::pin(future::ready(Ok(SyncProjectStatusResult {
                    project: project(ProjectStatus::Completed),
                    update: StatusUpdate {
                        should_update: true,
                        new_status: Some(ProjectStatus::Completed),
                        progress: 100,
                    },
                })))
            });

        let response = sync_project(&app_with(workspace_service), Uuid::nil())
            .await
            .unwrap();

        assert_eq!("Project is now completed (100% done)", response.to_string());
    }
}
