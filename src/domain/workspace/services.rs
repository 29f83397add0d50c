use crate::domain::calendar::Agenda;
use crate::domain::kanban::Board;
use crate::domain::session::{Bearer, SessionPort, current_bearer};
use crate::domain::status::{StatusUpdate, should_update_project_status};
use crate::domain::workspace::{
    AgendaParams, CreateProjectParams, CreateTagParams, CreateTaskParams, MoveCardParams,
    MoveCardResult, Project, ProjectChanges, ProjectDraft, ProjectStatus, SyncProjectStatusResult,
    Tag, TagDraft, Task, TaskChanges, TaskResult, UpdateProjectParams, UpdateTaskParams,
    WorkspaceApi, WorkspaceError, WorkspaceService, require_color, require_date_order,
    require_text,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: WorkspaceApi + Send + Sync + 'static,
{
    session: Arc<SESSION>,
    api: Arc<API>,
}

impl<SESSION, API> Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: WorkspaceApi + Send + Sync + 'static,
{
    pub fn new(session: Arc<SESSION>, api: Arc<API>) -> Self {
        Self { session, api }
    }

    async fn bearer(&self) -> Result<Bearer, WorkspaceError> {
        current_bearer(self.session.as_ref())
            .await?
            .ok_or(WorkspaceError::Unauthenticated)
    }

    async fn sync_status(
        &self,
        bearer: Bearer,
        project_id: Uuid,
    ) -> Result<SyncProjectStatusResult, WorkspaceError> {
        let project = self.api.find_project(bearer.clone(), project_id).await?;
        let tasks = self.api.list_tasks(bearer.clone(), Some(project_id)).await?;
        let update = should_update_project_status(&project, &tasks);

        let Some(status) = update.new_status.filter(|_| update.should_update) else {
            return Ok(SyncProjectStatusResult { project, update });
        };

        tracing::info!(
            project = %project_id,
            from = %project.status,
            to = %status,
            progress = update.progress,
            "updating project status"
        );
        let project = self
            .api
            .update_project(bearer, project_id, ProjectChanges::status(status))
            .await?;

        Ok(SyncProjectStatusResult { project, update })
    }

    /// Re-syncs the owning project after a task mutation. The task change
    /// already went through, so a failure here is only logged.
    async fn follow_up(&self, bearer: Bearer, project_id: Option<Uuid>) -> Option<StatusUpdate> {
        let project_id = project_id?;

        match self.sync_status(bearer, project_id).await {
            Ok(result) => Some(result.update),
            Err(e) => {
                tracing::warn!(project = %project_id, "failed to sync project status: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl<SESSION, API> WorkspaceService for Service<SESSION, API>
where
    SESSION: SessionPort + Send + Sync + 'static,
    API: WorkspaceApi + Send + Sync + 'static,
{
    async fn get_projects(&self) -> Result<Vec<Project>, WorkspaceError> {
        let bearer = self.bearer().await?;

        Ok(self.api.list_projects(bearer).await?)
    }

    async fn get_project(&self, project_id: Uuid) -> Result<Project, WorkspaceError> {
        let bearer = self.bearer().await?;

        Ok(self.api.find_project(bearer, project_id).await?)
    }

    async fn create_project(
        &self,
        params: CreateProjectParams,
    ) -> Result<Project, WorkspaceError> {
        require_text("project name", &params.name)?;
        require_date_order(params.start_date, params.end_date)?;
        let bearer = self.bearer().await?;

        let project = self
            .api
            .create_project(
                bearer,
                ProjectDraft {
                    name: params.name.trim().to_string(),
                    description: params.description,
                    start_date: params.start_date,
                    end_date: params.end_date,
                    status: ProjectStatus::Ongoing,
                    member_ids: params.member_ids,
                },
            )
            .await?;

        Ok(project)
    }

    async fn update_project(
        &self,
        params: UpdateProjectParams,
    ) -> Result<Project, WorkspaceError> {
        if let Some(name) = &params.name {
            require_text("project name", name)?;
        }
        require_date_order(params.start_date, params.end_date)?;
        let bearer = self.bearer().await?;

        let project = self
            .api
            .update_project(
                bearer,
                params.project_id,
                ProjectChanges {
                    name: params.name.map(|name| name.trim().to_string()),
                    description: params.description,
                    start_date: params.start_date,
                    end_date: params.end_date,
                    status: params.status,
                },
            )
            .await?;

        Ok(project)
    }

    async fn delete_project(&self, project_id: Uuid) -> Result<(), WorkspaceError> {
        let bearer = self.bearer().await?;
        self.api.delete_project(bearer, project_id).await?;

        Ok(())
    }

    async fn sync_project_status(
        &self,
        project_id: Uuid,
    ) -> Result<SyncProjectStatusResult, WorkspaceError> {
        let bearer = self.bearer().await?;

        self.sync_status(bearer, project_id).await
    }

    async fn get_tasks(&self, project_id: Option<Uuid>) -> Result<Vec<Task>, WorkspaceError> {
        let bearer = self.bearer().await?;

        Ok(self.api.list_tasks(bearer, project_id).await?)
    }

    async fn get_task(&self, task_id: Uuid) -> Result<Task, WorkspaceError> {
        let bearer = self.bearer().await?;

        Ok(self.api.find_task(bearer, task_id).await?)
    }

    async fn create_task(&self, params: CreateTaskParams) -> Result<TaskResult, WorkspaceError> {
        require_text("task title", &params.title)?;
        let bearer = self.bearer().await?;

        let task = self
            .api
            .create_task(
                bearer.clone(),
                CreateTaskParams {
                    title: params.title.trim().to_string(),
                    ..params
                },
            )
            .await?;
        let project_update = self.follow_up(bearer, task.project_id).await;

        Ok(TaskResult {
            task,
            project_update,
        })
    }

    async fn update_task(&self, params: UpdateTaskParams) -> Result<TaskResult, WorkspaceError> {
        if let Some(title) = &params.title {
            require_text("task title", title)?;
        }
        let bearer = self.bearer().await?;
        let status_changed = params.status.is_some();

        let task = self
            .api
            .update_task(bearer.clone(), params.task_id, TaskChanges::from(params))
            .await?;

        let project_update = if status_changed {
            self.follow_up(bearer, task.project_id).await
        } else {
            None
        };

        Ok(TaskResult {
            task,
            project_update,
        })
    }

    async fn delete_task(&self, task_id: Uuid) -> Result<(), WorkspaceError> {
        let bearer = self.bearer().await?;
        let task = self.api.find_task(bearer.clone(), task_id).await?;
        self.api.delete_task(bearer.clone(), task_id).await?;
        self.follow_up(bearer, task.project_id).await;

        Ok(())
    }

    async fn load_board(&self, project_id: Uuid) -> Result<Board, WorkspaceError> {
        let bearer = self.bearer().await?;
        let tasks = self.api.list_tasks(bearer, Some(project_id)).await?;

        Ok(Board::from_tasks(Some(project_id), &tasks))
    }

    async fn move_card(&self, params: MoveCardParams) -> Result<MoveCardResult, WorkspaceError> {
        let mut board = params.board;
        let change = board.move_card(params.task_id, params.to_status, params.to_index)?;

        let Some(change) = change else {
            return Ok(MoveCardResult {
                board,
                change: None,
                project_update: None,
            });
        };

        let bearer = self.bearer().await?;
        tracing::debug!(
            task = %change.task_id,
            from = %change.from,
            to = %change.to,
            "moving card"
        );
        let task = self
            .api
            .update_task(bearer.clone(), change.task_id, TaskChanges::status(change.to))
            .await?;
        let project_update = self
            .follow_up(bearer, task.project_id.or(board.project_id))
            .await;

        Ok(MoveCardResult {
            board,
            change: Some(change),
            project_update,
        })
    }

    async fn agenda(&self, params: AgendaParams) -> Result<Agenda, WorkspaceError> {
        let bearer = self.bearer().await?;

        let projects = match params.project_id {
            Some(project_id) => vec![self.api.find_project(bearer.clone(), project_id).await?],
            None => self.api.list_projects(bearer.clone()).await?,
        };
        let tasks = self.api.list_tasks(bearer, params.project_id).await?;

        Ok(Agenda::build(&projects, &tasks, params.from, params.to)?)
    }

    async fn get_tags(&self, project_id: Uuid) -> Result<Vec<Tag>, WorkspaceError> {
        let bearer = self.bearer().await?;

        Ok(self.api.list_tags(bearer, project_id).await?)
    }

    async fn create_tag(&self, params: CreateTagParams) -> Result<Tag, WorkspaceError> {
        require_text("tag name", &params.name)?;
        require_color(&params.color)?;
        let bearer = self.bearer().await?;

        let tag = self
            .api
            .create_tag(
                bearer,
                params.project_id,
                TagDraft {
                    name: params.name.trim().to_string(),
                    color: params.color,
                    icon: params.icon,
                },
            )
            .await?;

        Ok(tag)
    }

    async fn delete_tag(&self, tag_id: Uuid) -> Result<(), WorkspaceError> {
        let bearer = self.bearer().await?;
        self.api.delete_tag(bearer, tag_id).await?;

        Ok(())
    }
}
