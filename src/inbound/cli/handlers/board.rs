use crate::core::application::ApplicationServices;
use crate::domain::workspace::{MoveCardParams, TaskStatus, WorkspaceService};
use crate::errors::AppError;
use crate::inbound::cli::responses::board::{BoardResponse, MoveResponse};
use uuid::Uuid;

pub async fn show_board<S: ApplicationServices>(
    state: &S,
    project_id: Uuid,
) -> Result<BoardResponse, AppError> {
    let board = state.workspace_service().load_board(project_id).await?;

    Ok(BoardResponse::from(&board))
}

/// Loads the board fresh and drops the card at `to_index` of the target
/// column, or at its bottom when no index is given.
pub async fn move_card<S: ApplicationServices>(
    state: &S,
    project_id: Uuid,
    task_id: Uuid,
    to_status: TaskStatus,
    to_index: Option<usize>,
) -> Result<MoveResponse, AppError> {
    let workspace_service = state.workspace_service();
    let board = workspace_service.load_board(project_id).await?;

    let result = workspace_service
        .move_card(MoveCardParams {
            board,
            task_id,
            to_status,
            to_index: to_index.unwrap_or(usize::MAX),
        })
        .await?;

    Ok(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::tests::{MockAppInstanceParameters, MockApplication};
    use crate::domain::kanban::{Board, KanbanError};
    use crate::domain::workspace::{MockWorkspaceService, MoveCardResult, Task, WorkspaceError};
    use std::future;

    fn app_with(workspace_service: MockWorkspaceService) -> MockApplication {
        MockApplication::mock_instance(MockAppInstanceParameters {
            workspace_service: Some(workspace_service),
            ..Default::default()
        })
    }

    fn board(project_id: Uuid, task_id: Uuid) -> Board {
        let task = Task {
            id: task_id,
            title: "Deploy".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: Default::default(),
            due_date: None,
            project_id: Some(project_id),
            assignee: None,
            tags: vec![],
        };

        Board::from_tasks(Some(project_id), &[task])
    }

    #[tokio::test]
    async fn test_show_board() {
        let project_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service
            .expect_load_board()
            .times(1)
            .returning(move |_| Box::pin(future::ready(Ok(board(project_id, task_id)))));

        let response = show_board(&app_with(workspace_service), project_id)
            .await
            .unwrap();

        assert!(response.to_string().contains("Deploy"));
    }

    #[tokio::test]
    async fn test_move_card_defaults_to_bottom() {
        let project_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service
            .expect_load_board()
            .withf(move |id| *id == project_id)
            .times(1)
            .returning(move |_| Box::pin(future::ready(Ok(board(project_id, task_id)))));
        workspace_service
            .expect_move_card()
            .withf(move |params| {
                params.task_id == task_id
                    && params.to_status == TaskStatus::Done
                    && params.to_index == usize::MAX
            })
            .times(1)
            .returning(move |params| {
                let mut board = params.board;
                let change = board
                    .move_card(params.task_id, params.to_status, params.to_index)
                    .unwrap();
                Box::pin(future::ready(Ok(MoveCardResult {
                    board,
                    change,
                    project_update: None,
                })))
            });

        let response = move_card(
            &app_with(workspace_service),
            project_id,
            task_id,
            TaskStatus::Done,
            None,
        )
        .await
        .unwrap();

        assert!(
            response
                .to_string()
                .ends_with(&format!("moved {task_id} from todo to done"))
        );
    }

    #[tokio::test]
    async fn test_move_unknown_card() {
        let project_id = Uuid::new_v4();
        let task_id = Uuid::new_v4();
        let mut workspace_service = MockWorkspaceService::new();
        workspace_service
            .expect_load_board()
            .returning(move |_| Box::pin(future::ready(Ok(Board::new(Some(project_id))))));
        workspace_service.expect_move_card().returning(move |_| {
            Box::pin(future::ready(Err(WorkspaceError::KanbanError(
                KanbanError::CardNotFound(task_id),
            ))))
        });

        let result = move_card(
            &app_with(workspace_service),
            project_id,
            task_id,
            TaskStatus::Done,
            Some(0),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(Some(_)))));
    }
}
