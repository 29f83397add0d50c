use crate::core::application::ApplicationServices;
use crate::domain::workspace::{CreateTaskParams, TaskStatus, UpdateTaskParams, WorkspaceService};
use crate::errors::AppError;
use crate::inbound::cli::responses::shared::MessageResponse;
use crate::inbound::cli::responses::task::{TaskListResponse, TaskResponse};
use uuid::Uuid;

pub async fn list_tasks<S: ApplicationServices>(
    state: &S,
    project_id: Option<Uuid>,
) -> Result<TaskListResponse, AppError> {
    let tasks = state.workspace_service().get_tasks(project_id).await?;

    Ok(tasks.into())
}

pub async fn show_task<S: ApplicationServices>(
    state: &S,
    task_id: Uuid,
) -> Result<TaskResponse, AppError> {
    let task = state.workspace_service().get_task(task_id).await?;

    Ok(task.into())
}

pub async fn create_task<S: ApplicationServices>(
    state: &S,
    params: CreateTaskParams,
) -> Result<TaskResponse, AppError> {
    let result = state.workspace_service().create_task(params).await?;

    Ok(result.into())
}

pub async fn update_task<S: ApplicationServices>(
    state: &S,
    params: UpdateTaskParams,
) -> Result<TaskResponse, AppError> {
    let result = state.workspace_service().update_task(params).await?;

    Ok(result.into())
}

pub async fn set_task_status<S: ApplicationServices>(
    state: &S,
    task_id: Uuid,
    status: TaskStatus,
) -> Result<TaskResponse, AppError> {
    update_task(
        state,
        UpdateTaskParams {
            task_id,
            status: Some(status),
            ..Default::default()
        },
    )
    .await
}

pub async fn delete_task<S: ApplicationServices>(
    state: &S,
    task_id: Uuid,
) -> Result<MessageResponse, AppError> {
    state.workspace_service().delete_task(task_id).await?;

    Ok(MessageResponse::new("Task deleted"))
}
