use crate::domain::calendar::{Agenda, CalendarError};
use crate::domain::kanban::{Board, KanbanError, StatusChange};
use crate::domain::session::{Bearer, SessionError};
use crate::domain::status::StatusUpdate;
use crate::domain::workspace::{
    Project, ProjectStatus, Tag, Task, TaskPriority, TaskStatus, ValidationError,
};
use crate::outbound::rest::error::Error as BackendError;
use async_trait::async_trait;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

////////////////////////////////////////////////////////////////////////////////////////////////////
// Service
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait WorkspaceService: Send + Sync {
    async fn get_projects(&self) -> Result<Vec<Project>, WorkspaceError>;
    async fn get_project(&self, project_id: Uuid) -> Result<Project, WorkspaceError>;
    async fn create_project(&self, params: CreateProjectParams)
    -> Result<Project, WorkspaceError>;
    async fn update_project(&self, params: UpdateProjectParams)
    -> Result<Project, WorkspaceError>;
    async fn delete_project(&self, project_id: Uuid) -> Result<(), WorkspaceError>;
    async fn sync_project_status(
        &self,
        project_id: Uuid,
    ) -> Result<SyncProjectStatusResult, WorkspaceError>;

    async fn get_tasks(&self, project_id: Option<Uuid>) -> Result<Vec<Task>, WorkspaceError>;
    async fn get_task(&self, task_id: Uuid) -> Result<Task, WorkspaceError>;
    async fn create_task(&self, params: CreateTaskParams) -> Result<TaskResult, WorkspaceError>;
    async fn update_task(&self, params: UpdateTaskParams) -> Result<TaskResult, WorkspaceError>;
    async fn delete_task(&self, task_id: Uuid) -> Result<(), WorkspaceError>;

    async fn load_board(&self, project_id: Uuid) -> Result<Board, WorkspaceError>;
    async fn move_card(&self, params: MoveCardParams) -> Result<MoveCardResult, WorkspaceError>;

    async fn agenda(&self, params: AgendaParams) -> Result<Agenda, WorkspaceError>;

    async fn get_tags(&self, project_id: Uuid) -> Result<Vec<Tag>, WorkspaceError>;
    async fn create_tag(&self, params: CreateTagParams) -> Result<Tag, WorkspaceError>;
    async fn delete_tag(&self, tag_id: Uuid) -> Result<(), WorkspaceError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Ports
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait WorkspaceApi: Send + Sync {
    async fn list_projects(&self, bearer: Bearer) -> Result<Vec<Project>, BackendError>;
    async fn find_project(&self, bearer: Bearer, project_id: Uuid)
    -> Result<Project, BackendError>;
    async fn create_project(
        &self,
        bearer: Bearer,
        params: ProjectDraft,
    ) -> Result<Project, BackendError>;
    async fn update_project(
        &self,
        bearer: Bearer,
        project_id: Uuid,
        params: ProjectChanges,
    ) -> Result<Project, BackendError>;
    async fn delete_project(&self, bearer: Bearer, project_id: Uuid) -> Result<(), BackendError>;

    async fn list_tasks(
        &self,
        bearer: Bearer,
        project_id: Option<Uuid>,
    ) -> Result<Vec<Task>, BackendError>;
    async fn find_task(&self, bearer: Bearer, task_id: Uuid) -> Result<Task, BackendError>;
    async fn create_task(&self, bearer: Bearer, params: TaskDraft) -> Result<Task, BackendError>;
    async fn update_task(
        &self,
        bearer: Bearer,
        task_id: Uuid,
        params: TaskChanges,
    ) -> Result<Task, BackendError>;
    async fn delete_task(&self, bearer: Bearer, task_id: Uuid) -> Result<(), BackendError>;

    async fn list_tags(&self, bearer: Bearer, project_id: Uuid) -> Result<Vec<Tag>, BackendError>;
    async fn create_tag(
        &self,
        bearer: Bearer,
        project_id: Uuid,
        params: TagDraft,
    ) -> Result<Tag, BackendError>;
    async fn delete_tag(&self, bearer: Bearer, tag_id: Uuid) -> Result<(), BackendError>;
}

//------------------------------------------------------------------------------
// Projects
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProjectParams {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProjectParams {
    pub project_id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<ProjectStatus>,
}

/// Body of a project creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: ProjectStatus,
    pub member_ids: Vec<Uuid>,
}

/// Partial project update; `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<ProjectStatus>,
}

impl ProjectChanges {
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncProjectStatusResult {
    pub project: Project,
    pub update: StatusUpdate,
}

//------------------------------------------------------------------------------
// Tasks
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskParams {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Date>,
    pub project_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub tag_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskParams {
    pub task_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Date>,
    pub assignee_id: Option<Uuid>,
    pub tag_ids: Option<Vec<Uuid>>,
}

pub type TaskDraft = CreateTaskParams;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Date>,
    pub assignee_id: Option<Uuid>,
    pub tag_ids: Option<Vec<Uuid>>,
}

impl TaskChanges {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl From<UpdateTaskParams> for TaskChanges {
    fn from(value: UpdateTaskParams) -> Self {
        Self {
            title: value.title,
            description: value.description,
            status: value.status,
            priority: value.priority,
            due_date: value.due_date,
            assignee_id: value.assignee_id,
            tag_ids: value.tag_ids,
        }
    }
}

/// A task mutation together with the project status change it triggered.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub task: Task,
    pub project_update: Option<StatusUpdate>,
}

//------------------------------------------------------------------------------
// Board
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MoveCardParams {
    pub board: Board,
    pub task_id: Uuid,
    pub to_status: TaskStatus,
    pub to_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveCardResult {
    pub board: Board,
    pub change: Option<StatusChange>,
    pub project_update: Option<StatusUpdate>,
}

//------------------------------------------------------------------------------
// Calendar
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaParams {
    pub from: Date,
    pub to: Date,
    pub project_id: Option<Uuid>,
}

//------------------------------------------------------------------------------
// Tags
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTagParams {
    pub project_id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagDraft {
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("user is not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error(transparent)]
    KanbanError(#[from] KanbanError),

    #[error(transparent)]
    CalendarError(#[from] CalendarError),

    #[error(transparent)]
    SessionError(#[from] SessionError),

    #[error(transparent)]
    BackendError(BackendError),
}

impl From<BackendError> for WorkspaceError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Unauthorized => Self::Unauthenticated,
            other => Self::BackendError(other),
        }
    }
}
